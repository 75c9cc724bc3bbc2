//! Database connection pool management
//!
//! Uses a sqlx SQLite pool with explicit connection limits. Every request
//! acquires its own connection and returns it to the pool on drop; writers
//! open an explicit transaction on it.

use std::str::FromStr;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Connection, Sqlite};

use super::DbError;

/// Acquisition attempts before giving up (first try plus one reconnect).
const ACQUIRE_ATTEMPTS: u32 = 2;

/// How long a single acquisition may wait for a free connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the catalogue database
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool against `database_url`, creating the database file if needed.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Database::connect("sqlite://gapfill.db", 5).await?;
    /// ```
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(DbError::Connection)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(DbError::Connection)?;

        tracing::info!(max_connections, "database pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a live connection.
    ///
    /// Each candidate is pinged; a dead one is closed instead of returned to
    /// the pool and acquisition is retried, up to [`ACQUIRE_ATTEMPTS`] total.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, DbError> {
        let mut attempt = 1;
        loop {
            match self.try_acquire().await {
                Ok(conn) => return Ok(conn),
                Err(err) if attempt < ACQUIRE_ATTEMPTS => {
                    tracing::warn!(
                        attempt,
                        max_attempts = ACQUIRE_ATTEMPTS,
                        error = %err,
                        "database connection unusable, retrying"
                    );
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(
                        attempts = ACQUIRE_ATTEMPTS,
                        error = %err,
                        "giving up on database connection"
                    );
                    return Err(DbError::Connection(err));
                }
            }
        }
    }

    async fn try_acquire(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        if let Err(err) = conn.ping().await {
            conn.close_on_drop();
            return Err(err);
        }
        tracing::trace!("database ping ok");
        Ok(conn)
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
