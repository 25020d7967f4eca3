use sea_orm_migration::prelude::*;
use sha2::Digest as _;

use crate::m20260815_102400_init::Empleado;

#[derive(DeriveMigrationName)]
pub struct Migration;

const NOMBRES: [&str; 10] = ["Ana", "Bruno", "Carla", "Diego", "Elena", "Federico", "Gabriela", "Hernán", "Inés", "Julián"];
const APELLIDOS: [&str; 10] = ["Acosta", "Benítez", "Castro", "Domínguez", "Espósito", "Fernández", "Giménez", "Herrera", "Ibáñez", "Juárez"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let time = Expr::val("2026-08-18T09:30:12.000Z").cast_as("timestamptz");

        // Creates 30 empleados
        for i in 1..=30usize {
            let uuid = format!("{:032x}", i as u128);
            let numero_legajo = format!("L-{:04}", i);
            let email = format!("empleado{}@dosrobles.test", i);
            let nombre = NOMBRES[(i - 1) % 10];
            let apellido = APELLIDOS[(i * 3) % 10];
            let sueldo_bruto = rand::random_range(250_000i64..=900_000);

            let clave = format!("empleado{}", i);
            let hashed_password = &sha2::Sha256::digest(&format!("{}:{}", clave, email))[..];

            manager
                .exec_stmt(Query::insert()
                    .into_table(Empleado::Table)
                    .columns(["id", "created_at", "updated_at", "nombre", "apellido", "numero_legajo", "email", "password", "role", "sueldo_bruto"])
                    .values_panic([Expr::val(uuid).cast_as("uuid"), time.clone(), time.clone(), nombre.into(), apellido.into(), numero_legajo.into(), email.into(), hashed_password.into(), Expr::val("empleado").cast_as("role_type"), sueldo_bruto.into()])
                    .to_owned()
            ).await.unwrap();
        }

        // Create an admin for RRHH

        let email = "rrhh@dosrobles.test";
        let hashed_password = &sha2::Sha256::digest(&format!("admin:{}", email))[..];

        manager
            .exec_stmt(Query::insert()
                .into_table(Empleado::Table)
                .columns(["id", "created_at", "updated_at", "nombre", "apellido", "numero_legajo", "email", "password", "role", "sueldo_bruto"])
                .values_panic([Expr::val(format!("{:032x}", 12345 as u128)).cast_as("uuid"), time.clone(), time.clone(), "Rosa".into(), "Robles".into(), "L-0001A".into(), email.into(), hashed_password.into(), Expr::val("admin").cast_as("role_type"), 1_200_000i64.into()])
                .to_owned()
        ).await.unwrap();

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for i in 1..=30usize {
            let uuid = format!("{:032x}", i as u128);

            manager
                .exec_stmt(Query::delete()
                    .from_table(Empleado::Table)
                    .and_where(Expr::col("id").eq(Expr::val(uuid).cast_as("uuid")))
                    .to_owned()
            ).await.unwrap();
        }

        manager
            .exec_stmt(Query::delete()
                .from_table(Empleado::Table)
                .and_where(Expr::col("id").eq(Expr::val(format!("{:032x}", 12345 as u128)).cast_as("uuid")))
                .to_owned()
        ).await.unwrap();

        Ok(())
    }
}
