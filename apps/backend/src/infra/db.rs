//! Database bootstrap: build a connection for the requested profile and
//! bring the schema up to date before handing it to the application.

use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect and migrate. Single entrypoint used by `main` and by tests.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(&profile)?;

    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    match profile {
        DbProfile::Prod => {
            opts.max_connections(10)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5));
        }
        DbProfile::Test => {
            // A pooled sqlite::memory: gives every connection its own empty
            // database; pin the pool to one connection so the whole test
            // shares one schema.
            opts.max_connections(1);
        }
    }

    let conn = Database::connect(opts)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect: {e}")))?;

    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    info!(profile = ?profile, "database ready");
    Ok(conn)
}
