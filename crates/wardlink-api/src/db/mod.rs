//! # Database Persistence Layer
//!
//! Optional PostgreSQL persistence for the scan log via SQLx. When
//! `DATABASE_URL` is set, scan events outlive restarts; when absent, the
//! API runs with the in-memory log (suitable for development and tests).
//!
//! Bands and profiles stay behind the in-memory `TxStore` in this phase;
//! only the append-only scan log has a database-backed implementation.

pub mod scan_events;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub use scan_events::PgScanLog;

/// Initialize the connection pool and run embedded migrations.
///
/// Returns `None` if `DATABASE_URL` is not set. Returns `Err` if the URL
/// is set but the connection or a migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set, running with the in-memory scan log. \
                 Scan history will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;
    tracing::info!("connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(Some(pool))
}
