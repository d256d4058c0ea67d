//! Shared fixtures for the workspace integration tests.

use std::sync::Arc;

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbBlobStore, DbPool, DbSettings, DbSheet, connect};
use products_hr::HrModule;

pub const SHEET: &str = "Employees";
pub const BASE_URL: &str = "http://roster.test";

/// Fresh in-memory sqlite database with every migration applied.
pub async fn migrated_sqlite() -> Result<DbPool> {
    let pool = connect(&DatabaseSettings::new("sqlite::memory:")).await?;
    Migrator::up(&pool, None).await?;
    Ok(pool)
}

pub fn db_module(pool: &DbPool) -> HrModule {
    HrModule::new(
        Arc::new(DbSheet::new(pool.clone(), SHEET)),
        Arc::new(DbSettings::new(pool.clone())),
        Arc::new(DbBlobStore::new(pool.clone(), BASE_URL)),
        "EmployeePhotos",
    )
}
