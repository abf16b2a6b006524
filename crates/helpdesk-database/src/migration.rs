//! Schema migrations for the presence tables.

use sqlx::PgPool;
use tracing::info;

use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;

/// Apply all pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(
        available = migrator.iter().count(),
        "Applying presence schema migrations"
    );

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Presence schema is up to date");
    Ok(())
}
