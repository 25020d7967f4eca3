use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::RoleType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "empleado")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub nombre: String,
    pub apellido: String,
    #[sea_orm(unique)]
    pub numero_legajo: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: Vec<u8>,
    pub role: RoleType,
    pub sueldo_bruto: Option<i64>,
    pub sueldo_basico: Option<i64>,
}

impl Model {
    /// Base salary for payroll purposes: `sueldo_bruto` if present, else
    /// `sueldo_basico`. `None` (and non-positive values) must be rejected by
    /// the payroll formula, never silently treated as zero.
    pub fn sueldo_base(&self) -> Option<i64> {
        self.sueldo_bruto.or(self.sueldo_basico)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::calculo_detalle::Entity")]
    CalculoDetalle,
    #[sea_orm(has_many = "super::fichaje::Entity")]
    Fichaje,
    #[sea_orm(has_many = "super::licencia::Entity")]
    Licencia,
    #[sea_orm(has_many = "super::nomina::Entity")]
    Nomina,
    #[sea_orm(has_many = "super::notificacion::Entity")]
    Notificacion,
}

impl Related<super::calculo_detalle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CalculoDetalle.def()
    }
}

impl Related<super::fichaje::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fichaje.def()
    }
}

impl Related<super::licencia::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Licencia.def()
    }
}

impl Related<super::nomina::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Nomina.def()
    }
}

impl Related<super::notificacion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notificacion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
