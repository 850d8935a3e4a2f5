//! Schema migrations for the folder forest and document tables.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{debug, info};

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;

/// Migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending hierarchy migration.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    for migration in MIGRATOR.iter() {
        debug!(
            version = migration.version,
            description = %migration.description,
            "Known schema migration"
        );
    }

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to apply schema migrations", e)
    })?;

    info!(
        migrations = MIGRATOR.iter().count(),
        "Hierarchy schema is up to date"
    );
    Ok(())
}
