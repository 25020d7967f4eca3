use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Message addressed to one employee. This backend only constructs and
/// stores the payload; delivery is someone else's problem.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notificacion")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub empleado_id: Uuid,
    pub tipo: String,
    pub asunto: String,
    pub descripcion: String,
    pub leida: bool,
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
