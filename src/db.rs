use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

use crate::config::Config;

/// Opens the pool and brings the schema up to date.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    // Every connection to `sqlite::memory:` is a separate database, so keep
    // exactly one alive.
    if config.database_url.contains(":memory:") {
        opt.max_connections(1).min_connections(1);
    }

    info!(
        "Connecting to database: {}",
        if config.database_url.starts_with("postgres") { "PostgreSQL" } else { "SQLite" }
    );
    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;
    info!("Database schema is up to date");

    Ok(db)
}
