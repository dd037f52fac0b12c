pub use sea_orm_migration::prelude::*;

mod m20251018_000001_create_scheduling_tables;
mod m20251018_000002_add_schedule_indexes;
mod m20251018_000003_add_schedule_exclusion_constraints;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251018_000001_create_scheduling_tables::Migration),
            Box::new(m20251018_000002_add_schedule_indexes::Migration),
            Box::new(m20251018_000003_add_schedule_exclusion_constraints::Migration),
        ]
    }
}
