/// Database migration runner
///
/// Migrations live in `migrations/` at the workspace root, one
/// timestamped SQL file per change, and are applied with sqlx's embedded
/// migrator. Running them is idempotent; already-applied migrations are
/// skipped.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending migrations
///
/// # Errors
///
/// Returns the first migration failure; sqlx rolls the failed migration
/// back where the statements allow it.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("running database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "migration failed");
            Err(e)
        }
    }
}
