use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::{setup_empleado_fk, util::{default_table_statement, DefaultColumn}};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(
                schema.create_enum_from_active_enum::<RoleType>()
            ).await.unwrap();

        manager
            .create_type(
                schema.create_enum_from_active_enum::<EstadoNomina>()
            ).await.unwrap();

        manager
            .create_type(
                schema.create_enum_from_active_enum::<EstadoLicencia>()
            ).await.unwrap();

        manager
            .create_type(
                schema.create_enum_from_active_enum::<TipoConcepto>()
            ).await.unwrap();

        manager
            .create_table(default_table_statement()
                .table(Empleado::Table)
                .col(ColumnDef::new(Empleado::Nombre)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Empleado::Apellido)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Empleado::NumeroLegajo)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Empleado::Email)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Empleado::Password)
                    .binary()
                    .not_null()) // Password should be in a hashed format
                .col(ColumnDef::new(Empleado::Role)
                    .custom(RoleType::name())
                    .not_null())
                .col(ColumnDef::new(Empleado::SueldoBruto)
                    .big_integer())
                .col(ColumnDef::new(Empleado::SueldoBasico)
                    .big_integer())
                .take()
            ).await.unwrap();

        manager
            .create_table(default_table_statement()
                .table(Fichaje::Table)
                .col(ColumnDef::new(Fichaje::EmpleadoId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Fichaje::Fecha)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Fichaje::HorasTrabajadas)
                    .double())
                .take()
            ).await.unwrap();
        setup_empleado_fk!(manager, Fichaje::Table, Fichaje::EmpleadoId);

        manager
            .create_table(default_table_statement()
                .table(Licencia::Table)
                .col(ColumnDef::new(Licencia::EmpleadoId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Licencia::Estado)
                    .custom(EstadoLicencia::name())
                    .not_null())
                .col(ColumnDef::new(Licencia::FechaInicio)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Licencia::FechaFin)
                    .date()
                    .not_null())
                .take()
            ).await.unwrap();
        setup_empleado_fk!(manager, Licencia::Table, Licencia::EmpleadoId);

        manager
            .create_table(default_table_statement()
                .table(Nomina::Table)
                .col(ColumnDef::new(Nomina::EmpleadoId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Nomina::Periodo)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Nomina::Estado)
                    .custom(EstadoNomina::name())
                    .not_null())
                .col(ColumnDef::new(Nomina::DiasTrabajados)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Nomina::DiasAusencia)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Nomina::HorasTrabajadas)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Nomina::HorasExtras)
                    .double()
                    .not_null())
                .col(ColumnDef::new(Nomina::SueldoBasico)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(Nomina::Haberes)
                    .json_binary()
                    .not_null())
                .col(ColumnDef::new(Nomina::Deducciones)
                    .json_binary()
                    .not_null())
                .col(ColumnDef::new(Nomina::TotalNeto)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(Nomina::CalculadoEn)
                    .timestamp_with_time_zone()
                    .not_null())
                .col(ColumnDef::new(Nomina::AprobadoPor)
                    .uuid())
                .col(ColumnDef::new(Nomina::FechaAprobacion)
                    .timestamp_with_time_zone())
                .take()
            ).await.unwrap();
        setup_empleado_fk!(manager, Nomina::Table, Nomina::EmpleadoId);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(Nomina::Table, Nomina::AprobadoPor)
            .to(Empleado::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::SetNull)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await.unwrap();

        // One nomina per (empleado, periodo); concurrent calculations race to this
        manager.create_index(IndexCreateStatement::new()
            .name("idx_nomina_empleado_periodo")
            .table(Nomina::Table)
            .col(Nomina::EmpleadoId)
            .col(Nomina::Periodo)
            .unique()
            .take()
        ).await.unwrap();

        manager
            .create_table(default_table_statement()
                .table(CalculoDetalle::Table)
                .col(ColumnDef::new(CalculoDetalle::NominaId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(CalculoDetalle::EmpleadoId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(CalculoDetalle::TipoConcepto)
                    .custom(TipoConcepto::name())
                    .not_null())
                .col(ColumnDef::new(CalculoDetalle::Concepto)
                    .text()
                    .not_null())
                .col(ColumnDef::new(CalculoDetalle::Cantidad)
                    .double()
                    .not_null())
                .col(ColumnDef::new(CalculoDetalle::ValorUnitario)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(CalculoDetalle::TotalConcepto)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(CalculoDetalle::Orden)
                    .small_integer()
                    .not_null())
                .take()
            ).await.unwrap();
        setup_empleado_fk!(manager, CalculoDetalle::Table, CalculoDetalle::EmpleadoId);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(CalculoDetalle::Table, CalculoDetalle::NominaId)
            .to(Nomina::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await.unwrap();

        manager
            .create_table(default_table_statement()
                .table(Notificacion::Table)
                .col(ColumnDef::new(Notificacion::EmpleadoId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Notificacion::Tipo)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Notificacion::Asunto)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Notificacion::Descripcion)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Notificacion::Leida)
                    .boolean()
                    .not_null()
                    .default(false))
                .take()
            ).await.unwrap();
        setup_empleado_fk!(manager, Notificacion::Table, Notificacion::EmpleadoId);

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(
            TableDropStatement::new()
                .table(Notificacion::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(CalculoDetalle::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(Nomina::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(Licencia::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(Fichaje::Table)
                .take()
        ).await.unwrap();

        manager.drop_table(
            TableDropStatement::new()
                .table(Empleado::Table)
                .take()
        ).await.unwrap();

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(TipoConcepto::name())
                    .to_owned()
            ).await.unwrap();

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(EstadoLicencia::name())
                    .to_owned()
            ).await.unwrap();

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(EstadoNomina::name())
                    .to_owned()
            ).await.unwrap();

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(RoleType::name())
                    .to_owned()
            ).await.unwrap();

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Empleado {
    Table,
    Nombre,
    Apellido,
    NumeroLegajo,
    Email,
    Password,
    Role,
    SueldoBruto,
    SueldoBasico,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role_type")]
enum RoleType {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "empleado")]
    Empleado,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "estado_nomina")]
enum EstadoNomina {
    #[sea_orm(string_value = "pendiente")]
    Pendiente,
    #[sea_orm(string_value = "calculado")]
    Calculado,
    #[sea_orm(string_value = "aprobado")]
    Aprobado,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "estado_licencia")]
enum EstadoLicencia {
    #[sea_orm(string_value = "pendiente")]
    Pendiente,
    #[sea_orm(string_value = "aprobado")]
    Aprobado,
    #[sea_orm(string_value = "rechazado")]
    Rechazado,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "tipo_concepto")]
enum TipoConcepto {
    #[sea_orm(string_value = "remunerativo")]
    Remunerativo,
    #[sea_orm(string_value = "no_remunerativo")]
    NoRemunerativo,
    #[sea_orm(string_value = "deduccion")]
    Deduccion,
}

#[derive(Iden)]
enum Fichaje {
    Table,
    EmpleadoId,
    Fecha,
    HorasTrabajadas,
}

#[derive(Iden)]
enum Licencia {
    Table,
    EmpleadoId,
    Estado,
    FechaInicio,
    FechaFin,
}

#[derive(Iden)]
enum Nomina {
    Table,
    EmpleadoId,
    Periodo,
    Estado,
    DiasTrabajados,
    DiasAusencia,
    HorasTrabajadas,
    HorasExtras,
    SueldoBasico,
    Haberes,
    Deducciones,
    TotalNeto,
    CalculadoEn,
    AprobadoPor,
    FechaAprobacion,
}

#[derive(Iden)]
enum CalculoDetalle {
    Table,
    NominaId,
    EmpleadoId,
    TipoConcepto,
    Concepto,
    Cantidad,
    ValorUnitario,
    TotalConcepto,
    Orden,
}

#[derive(Iden)]
enum Notificacion {
    Table,
    EmpleadoId,
    Tipo,
    Asunto,
    Descripcion,
    Leida,
}
