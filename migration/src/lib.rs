//! Database migrations for the Sitekit API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_06_01_000001_create_content_tables;
mod m2025_06_01_000002_create_analytics_tables;
mod m2025_06_01_000003_create_seo_tables;
mod m2025_06_01_000004_create_site_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_06_01_000001_create_content_tables::Migration),
            Box::new(m2025_06_01_000002_create_analytics_tables::Migration),
            Box::new(m2025_06_01_000003_create_seo_tables::Migration),
            Box::new(m2025_06_01_000004_create_site_tables::Migration),
        ]
    }
}
