//! # Authgate DB
//!
//! Database pool, schema migrations and user persistence for the Authgate API.
//!
//! - [`init_db_pool`] connects the PostgreSQL pool from [`ServerConfig`]
//! - [`MIGRATOR`] embeds `migrations/` at compile time
//! - [`users`]: the [`UserStore`] trait and its Postgres implementation
//!
//! # Example
//!
//! ```ignore
//! use authgate_db::{PgUserStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&server_config).await?;
//! run_migrations(&pool).await?;
//! let users = PgUserStore::new(pool);
//! ```

pub mod users;

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use authgate_config::ServerConfig;

// Re-export commonly used types at crate root
pub use sqlx::PgPool;
#[cfg(any(test, feature = "test-utils"))]
pub use users::MemoryUserStore;
pub use users::{PgUserStore, UserStore};

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a PostgreSQL pool using `DATABASE_URL` from [`ServerConfig`].
///
/// # Errors
///
/// Fails if the database is unreachable. Callers treat this as fatal.
pub async fn init_db_pool(config: &ServerConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    info!("Database connection established");

    Ok(pool)
}

/// Applies every pending migration.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");

    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    info!("Database migrations completed");
    Ok(())
}

/// Reverts the most recently applied migration.
///
/// Returns the reverted version, or `None` when nothing has been applied.
pub async fn revert_last_migration(pool: &PgPool) -> Result<Option<i64>> {
    let has_history: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await
            .context("Failed to inspect migration history")?;

    if !has_history {
        return Ok(None);
    }

    let latest: Option<i64> = sqlx::query_scalar(
        "SELECT version FROM _sqlx_migrations WHERE success ORDER BY version DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await
    .context("Failed to read migration history")?;

    let Some(latest) = latest else {
        return Ok(None);
    };

    let target = previous_version(MIGRATOR.iter().map(|m| m.version), latest);

    MIGRATOR
        .undo(pool, target)
        .await
        .with_context(|| format!("Failed to revert migration {}", latest))?;

    info!(version = latest, "Reverted migration");
    Ok(Some(latest))
}

/// The newest known version strictly older than `latest`, or 0.
fn previous_version(versions: impl Iterator<Item = i64>, latest: i64) -> i64 {
    versions.filter(|v| *v < latest).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_version() {
        let versions = [20250101000000, 20250101000000, 20250301000000];

        assert_eq!(
            previous_version(versions.into_iter(), 20250301000000),
            20250101000000
        );
        assert_eq!(previous_version(versions.into_iter(), 20250101000000), 0);
    }

    #[test]
    fn test_migrations_are_embedded_and_reversible() {
        assert!(MIGRATOR.iter().count() > 0);
        assert!(
            MIGRATOR
                .iter()
                .any(|m| m.migration_type.is_down_migration())
        );
    }
}
