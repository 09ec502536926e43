//! # Campus DB
//!
//! Persistence for the Campus API: the [`AccountStore`] contract, its PostgreSQL
//! implementation and pool/migration setup.
//!
//! With the `test-utils` feature an in-memory store is also available.
//!
//! # Example
//!
//! ```ignore
//! use campus_db::{PgAccountStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! let store = PgAccountStore::new(pool);
//! ```

use std::env;

use sqlx::postgres::PgPoolOptions;

pub mod postgres;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use postgres::PgAccountStore;
pub use store::AccountStore;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryAccountStore;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connects to `DATABASE_URL` with up to `DATABASE_MAX_CONNECTIONS` connections.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url =
        env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
