use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One clock-in record. `horas_trabajadas` is what was actually clocked; it
/// only matters for overtime, attendance itself counts as a flat workday.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fichaje")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub empleado_id: Uuid,
    pub fecha: Date,
    pub horas_trabajadas: Option<f64>,
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
}

impl Related<super::empleado::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Empleado.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
