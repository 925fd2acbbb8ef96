use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryPolicy, retry_with_backoff};

/// Opens a connection pool with the given settings.
pub async fn connect(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.into_connect_options()).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Like [`connect`], retrying with exponential backoff.
///
/// Uses [`RetryPolicy::default`] when `policy` is `None`. Meant for startup, when the
/// database may still be coming up next to the service.
pub async fn connect_with_retry(
    config: PostgresConfig,
    policy: Option<RetryPolicy>,
) -> Result<DatabaseConnection, DbErr> {
    let policy = policy.unwrap_or_default();
    retry_with_backoff(&policy, || connect(config.clone())).await
}

/// Applies all pending migrations of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
