use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role_type")]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "empleado")]
    Empleado,
}

/// Lifecycle of a nómina. A missing row for an (empleado, período) pair is
/// what `Pendiente` means in practice; the variant exists so the summary can
/// count over the full state space.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "estado_nomina")]
#[serde(rename_all = "snake_case")]
pub enum EstadoNomina {
    #[sea_orm(string_value = "pendiente")]
    Pendiente,
    #[sea_orm(string_value = "calculado")]
    Calculado,
    #[sea_orm(string_value = "aprobado")]
    Aprobado,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "estado_licencia")]
#[serde(rename_all = "snake_case")]
pub enum EstadoLicencia {
    #[sea_orm(string_value = "pendiente")]
    Pendiente,
    #[sea_orm(string_value = "aprobado")]
    Aprobado,
    #[sea_orm(string_value = "rechazado")]
    Rechazado,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "tipo_concepto")]
#[serde(rename_all = "snake_case")]
pub enum TipoConcepto {
    #[sea_orm(string_value = "remunerativo")]
    Remunerativo,
    #[sea_orm(string_value = "no_remunerativo")]
    NoRemunerativo,
    #[sea_orm(string_value = "deduccion")]
    Deduccion,
}
