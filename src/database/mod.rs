//! Database connection setup
//!
//! Builds the sea-orm connection pool from [`DatabaseConfig`] and applies the
//! schema migrations from the `lighter-web-migration` crate.

use std::time::Duration;

use lighter_web_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

/// Connect to the configured database, running migrations when
/// `database.auto_migrate` is set.
#[tracing::instrument(skip(config), fields(max_connections = config.max_connections))]
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(config.log_queries);

    let db = Database::connect(options).await?;

    ::tracing::info!("Database connected");

    if config.auto_migrate {
        Migrator::up(&db, None).await?;
        ::tracing::info!("Database migrations applied");
    }

    Ok(db)
}

/// In-memory SQLite database with all migrations applied.
///
/// The pool is pinned to a single connection: every SQLite `:memory:`
/// connection is its own database.
#[cfg(feature = "sqlite")]
pub async fn memory() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}
