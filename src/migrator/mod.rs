use sea_orm_migration::prelude::*;

mod m20260101_000001_create_clinic_tables;
mod m20260101_000002_seed_clinic_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_clinic_tables::Migration),
            Box::new(m20260101_000002_seed_clinic_data::Migration),
        ]
    }
}
