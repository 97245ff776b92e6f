pub use sea_orm_migration::prelude::*;

mod m20240110_000001_create_agencies;
mod m20240110_000002_create_users;
mod m20240110_000003_create_campaigns;
mod m20240110_000004_create_gaz;
mod m20240110_000005_create_severities;
mod m20240110_000006_create_leak_statuses;
mod m20240110_000007_create_leaks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240110_000001_create_agencies::Migration),
            Box::new(m20240110_000002_create_users::Migration),
            Box::new(m20240110_000003_create_campaigns::Migration),
            Box::new(m20240110_000004_create_gaz::Migration),
            Box::new(m20240110_000005_create_severities::Migration),
            Box::new(m20240110_000006_create_leak_statuses::Migration),
            Box::new(m20240110_000007_create_leaks::Migration),
        ]
    }
}
