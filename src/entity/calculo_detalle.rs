use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TipoConcepto;

/// One line of a nómina's breakdown. The full set of rows for a nómina is
/// replaced on every recalculation; `orden` fixes the display order 1..=9.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "calculo_detalle")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub nomina_id: Uuid,
    pub empleado_id: Uuid,
    pub tipo_concepto: TipoConcepto,
    pub concepto: String,
    pub cantidad: f64,
    pub valor_unitario: i64,
    pub total_concepto: i64,
    pub orden: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::empleado::Entity",
        from = "Column::EmpleadoId",
        to = "super::empleado::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Empleado,
    #[sea_orm(
        belongs_to = "super::nomina::Entity",
        from = "Column::NominaId",
        to = "super::nomina::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Nomina,
}

impl Related<super::empleado::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Empleado.def()
    }
}

impl Related<super::nomina::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Nomina.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
