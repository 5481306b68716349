use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Open a SeaORM connection pool from `config`.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.into_connect_options()).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Connect with exponential backoff; useful while the database container is still starting.
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry: RetryConfig,
) -> Result<DatabaseConnection, DbErr> {
    retry_with_backoff(|| connect_from_config(config.clone()), &retry).await
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}
