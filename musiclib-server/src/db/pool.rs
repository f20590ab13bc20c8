//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created
//! once at startup, verified with a round trip, handed to every component
//! that needs it and closed explicitly at shutdown.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a free connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool settings
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Create a PostgreSQL connection pool and verify connectivity.
///
/// # Errors
///
/// Returns an error if the server cannot be reached or rejects `SELECT 1`.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&PoolConfig::new("postgres://localhost/musiclib")).await?;
/// ```
pub async fn create_pool(config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await?;

    ping(&pool).await?;
    tracing::info!(
        max_connections = config.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Round trip to the server.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    let (one,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;
    debug_assert_eq!(one, 1);
    Ok(())
}

/// Close the pool, waiting at most `grace` for checked-out connections.
///
/// Returns `false` if the grace period ran out first; the remaining
/// connections are dropped when the pool is.
pub async fn close_pool(pool: &PgPool, grace: Duration) -> bool {
    match tokio::time::timeout(grace, pool.close()).await {
        Ok(()) => {
            tracing::info!("database pool closed");
            true
        }
        Err(_) => {
            tracing::warn!(
                grace_secs = grace.as_secs_f64(),
                "database pool did not drain within grace period"
            );
            false
        }
    }
}
