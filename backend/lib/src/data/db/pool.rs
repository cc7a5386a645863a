//! SmartPool implementation for SQLite connection management.
//!
//! ## Key Components
//! - [`SmartPool`] - bb8 pool of diesel-async wrapped SQLite connections
//!
//! ## Features
//! - `:memory:` databases use a single connection that is never recycled, so every
//!   caller sees the same data (this is what tests run against)
//! - File databases use a normal pool with a busy timeout on every connection
//! - Schema bootstrap through [`SmartPool::init_schema`]

use std::{sync::Arc, time::Duration};

use diesel::{sqlite::SqliteConnection, ConnectionError, ConnectionResult};
use diesel_async::{
    pooled_connection::{bb8::Pool, AsyncDieselConnectionManager, ManagerConfig},
    sync_connection_wrapper::SyncConnectionWrapper,
    AsyncConnection, RunQueryDsl,
};
use futures::{future::BoxFuture, FutureExt};
use tracing::{debug, info};

use super::error::{RepositoryError, RepositoryResult};
use crate::{
    config::DatabaseConfig,
    constants::database::{
        DEFAULT_CONNECTION_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS, IN_MEMORY_DB_PATH,
    },
};

/// Statement creating every table the backend owns
const CREATE_TRON_WALLET_TABLE: &str = include_str!("../../../sql/create_tron_wallet.sql");

/// Milliseconds a connection waits on a locked database before failing
const BUSY_TIMEOUT_MS: u32 = 5_000;

pub type AsyncSqliteConnection = SyncConnectionWrapper<SqliteConnection>;
pub type DbPool = Pool<AsyncSqliteConnection>;
pub type DbConnection<'a> =
    diesel_async::pooled_connection::bb8::PooledConnection<'a, AsyncSqliteConnection>;

/// Connection pool aware of in-memory databases.
pub struct SmartPool {
    /// The underlying bb8 pool
    inner: Arc<DbPool>,

    /// Whether the pool is backed by a private in-memory database
    in_memory: bool,
}

impl SmartPool {
    /// Create a new SmartPool for the configured database.
    ///
    /// The schema is not created here, see [`SmartPool::init_schema`].
    pub async fn new(config: &DatabaseConfig) -> RepositoryResult<Self> {
        let in_memory = config.path == IN_MEMORY_DB_PATH;

        let mut manager_cfg = ManagerConfig::default();
        manager_cfg.custom_setup = Box::new(|path: &str| establish_connection(path));
        let manager = AsyncDieselConnectionManager::<AsyncSqliteConnection>::new_with_config(
            &config.path,
            manager_cfg,
        );

        let connection_timeout = Duration::from_secs(
            config
                .connection_timeout_secs
                .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
        );

        let pool = if in_memory {
            // Every connection to `:memory:` opens a distinct database
            Pool::builder()
                .max_size(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connection_timeout(connection_timeout)
                .build(manager)
                .await
                .map_err(|e| RepositoryError::Pool(format!("Failed to create pool: {}", e)))?
        } else {
            Pool::builder()
                .max_size(config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
                .connection_timeout(connection_timeout)
                .idle_timeout(Some(Duration::from_secs(300)))
                .max_lifetime(Some(Duration::from_secs(3600)))
                .build(manager)
                .await
                .map_err(|e| RepositoryError::Pool(format!("Failed to create pool: {}", e)))?
        };

        debug!(target: "db::pool", path = %config.path, in_memory, "Created SQLite pool");

        Ok(Self {
            inner: Arc::new(pool),
            in_memory,
        })
    }

    /// Create a pool over a fresh in-memory database with the schema in place.
    pub async fn in_memory() -> RepositoryResult<Self> {
        let pool = Self::new(&DatabaseConfig {
            path: IN_MEMORY_DB_PATH.to_string(),
            max_connections: Some(1),
            connection_timeout_secs: None,
        })
        .await?;
        pool.init_schema().await?;

        Ok(pool)
    }

    /// Whether this pool is backed by an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    /// Get a connection from the pool.
    pub async fn get(&self) -> RepositoryResult<DbConnection<'_>> {
        self.inner
            .get()
            .await
            .map_err(|e| RepositoryError::Pool(format!("Failed to get connection: {}", e)))
    }

    /// Create the tables if they do not exist yet.
    pub async fn init_schema(&self) -> RepositoryResult<()> {
        let mut conn = self.get().await?;
        diesel::sql_query(CREATE_TRON_WALLET_TABLE)
            .execute(&mut *conn)
            .await?;

        info!(target: "db::pool", "Database schema ready");
        Ok(())
    }

    /// Run a trivial query to check that the database answers.
    pub async fn ping(&self) -> RepositoryResult<()> {
        let mut conn = self.get().await?;
        diesel::sql_query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}

fn establish_connection(path: &str) -> BoxFuture<'_, ConnectionResult<AsyncSqliteConnection>> {
    let fut = async move {
        let mut conn = AsyncSqliteConnection::establish(path).await?;
        diesel::sql_query(format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"))
            .execute(&mut conn)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;

        Ok(conn)
    };
    fut.boxed()
}
