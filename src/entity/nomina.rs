use sea_orm::{entity::prelude::*, FromJsonQueryResult};
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EstadoNomina;

/// One employee's computed pay for one `YYYY-MM` período. Unique per
/// (empleado_id, periodo). The haberes/deducciones breakdowns are embedded
/// JSON blocks, every monetary field already rounded to whole units.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nomina")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub empleado_id: Uuid,
    pub periodo: String,
    pub estado: EstadoNomina,
    pub dias_trabajados: i32,
    pub dias_ausencia: i32,
    pub horas_trabajadas: f64,
    pub horas_extras: f64,
    pub sueldo_basico: i64,
    #[sea_orm(column_type = "Json")]
    pub haberes: Haberes,
    #[sea_orm(column_type = "Json")]
    pub deducciones: Deducciones,
    pub total_neto: i64,
    pub calculado_en: DateTimeWithTimeZone,
    pub aprobado_por: Option<Uuid>,
    pub fecha_aprobacion: Option<DateTimeWithTimeZone>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Haberes {
    pub sueldo_basico: i64,
    pub antiguedad: i64,
    pub presentismo: i64,
    pub horas_extras: i64,
    pub viaticos: i64,
    pub otros_haberes: i64,
    pub total_haberes: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Deducciones {
    pub jubilacion: i64,
    pub obra_social: i64,
    pub ley19032: i64,
    pub sindicato: i64,
    pub otros_des: i64,
    pub total_deducciones: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::calculo_detalle::Entity")]
    CalculoDetalle,
    #[sea_orm(
        belongs_to = "super::empleado::Entity",
        from = "Column::EmpleadoId",
        to = "super::empleado::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Empleado,
}

impl Related<super::calculo_detalle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CalculoDetalle.def()
    }
}

impl Related<super::empleado::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Empleado.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
