//! Database primitives plus the sea-orm implementations of the roster's
//! sheet, settings and blob stores.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

mod blob;
mod settings;
mod sheet;

pub use blob::DbBlobStore;
pub use settings::DbSettings;
pub use sheet::DbSheet;

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://roster.db?mode=rwc";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing")]
    MissingUrl,
    #[error("database connection failed: {0}")]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
        }
    }

    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_connections);
        Self {
            url,
            max_connections,
        }
    }

    fn is_memory(&self) -> bool {
        self.url.starts_with("sqlite::memory:") || self.url.contains("mode=memory")
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    if settings.url.trim().is_empty() {
        return Err(DbError::MissingUrl);
    }
    let mut options = ConnectOptions::new(settings.url.clone());
    // Every pooled connection to an in-memory sqlite database sees its own database.
    let max = if settings.is_memory() {
        1
    } else {
        settings.max_connections
    };
    options
        .max_connections(max)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let pool = Database::connect(options).await?;
    info!(backend = ?pool.get_database_backend(), "database connected");
    Ok(pool)
}

#[cfg(test)]
pub(crate) mod testing {
    use migration::{Migrator, MigratorTrait};

    use super::*;

    pub async fn memory_pool() -> DbPool {
        let pool = connect(&DatabaseSettings::new("sqlite::memory:"))
            .await
            .unwrap();
        Migrator::up(&pool, None).await.unwrap();
        pool
    }
}
