use migration::Migrator;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use sea_orm_migration::MigratorTrait;

use crate::error::AppResult;

const SQLITE_PRAGMAS: [&str; 3] =
    ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA foreign_keys=ON"];

pub async fn connect_and_migrate(opts: impl Into<ConnectOptions>) -> AppResult<DatabaseConnection> {
    let opts = opts.into();
    let in_memory = opts.get_url().contains(":memory:");
    let db = Database::connect(opts).await?;

    if db.get_database_backend() == DatabaseBackend::Sqlite && !in_memory {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    Migrator::up(&db, None).await?;
    tracing::debug!("migrations applied");
    Ok(db)
}

/// Single-connection in-memory store, so every query sees the same database.
pub async fn connect_in_memory() -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    connect_and_migrate(opts).await
}
