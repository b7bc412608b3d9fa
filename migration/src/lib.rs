pub use sea_orm_migration::prelude::*;

mod m20250210_000001_create_projects;
mod m20250210_000002_create_wells;
mod m20250210_000003_create_operations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250210_000001_create_projects::Migration),
            Box::new(m20250210_000002_create_wells::Migration),
            Box::new(m20250210_000003_create_operations::Migration),
        ]
    }
}
