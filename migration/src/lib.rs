pub use sea_orm_migration::prelude::*;

mod util;
mod m20260815_102400_init;
mod m20260818_093012_generate_empleados;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_102400_init::Migration),
            Box::new(m20260818_093012_generate_empleados::Migration),
        ]
    }
}
