//! Repository pattern implementation for database operations.
//!
//! This module provides a generic abstraction over CRUD operations on any table
//! whose rows map to an [`Entity`].
//!
//! ## Key Components
//! - [`Entity`] - A persisted type with an `i64` primary key and its diesel glue
//! - [`CrudOperations`] - Entity-agnostic CRUD, ordering and pagination
//! - [`Repository`] - SQLite implementation of [`CrudOperations`]
//! - [`SmartPool`] - Connection pool, single-connection for in-memory databases
//! - [`Page`] / [`PageParams`] - Pagination helper types
//!
//! ## Semantics
//! - Every operation checks out its own connection and commits immediately
//! - Missing rows are reported as `None` (`get`, `update`) or `false` (`delete`)
//!
//! ## Usage Example
//! ```ignore
//! use data::db::{CrudOperations, Repository, SmartPool, SortOrder};
//!
//! let pool = Arc::new(SmartPool::in_memory().await?);
//! let repo = Repository::<TronWallet>::new(pool);
//! let newest_first = repo.get_all(SortOrder::Desc).await?;
//! ```

use async_trait::async_trait;
use diesel::QueryResult;
use serde::{Deserialize, Serialize};

pub mod entities;
pub mod error;
pub mod page;
pub mod pool;
pub mod repository;
pub mod schema;

pub use entities::{Balance, NewTronWallet, TronWallet, TronWalletPatch};
pub use error::{RepositoryError, RepositoryResult};
pub use page::{paginate, Page, PageParams};
pub use pool::{DbConnection, SmartPool};
pub use repository::Repository;

/// Ordering of listings by primary key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A type stored as rows of a single table, keyed by an `i64` primary key.
///
/// Besides the key accessor, implementors provide the per-table queries. They
/// receive a checked-out connection and never commit on their own behalf; the
/// generic [`Repository`] owns connection handling.
#[async_trait]
pub trait Entity: Sized + Send + Sync + 'static {
    /// Values required to insert a new row
    type New: Send + 'static;

    /// Explicit set of optional field overwrites
    type Patch: Send + 'static;

    /// Human-readable name of the entity, used in logs and errors
    const NAME: &'static str;

    /// Primary key
    fn id(&self) -> i64;

    /// Load a row by primary key
    async fn find_by_id(conn: &mut DbConnection<'_>, id: i64) -> QueryResult<Option<Self>>;

    /// Load rows ordered by primary key, optionally within a `(limit, offset)` window
    async fn load_ordered(
        conn: &mut DbConnection<'_>,
        order: SortOrder,
        window: Option<(i64, i64)>,
    ) -> QueryResult<Vec<Self>>;

    /// Count every row
    async fn count_all(conn: &mut DbConnection<'_>) -> QueryResult<i64>;

    /// Insert a row and return it as stored
    async fn insert(conn: &mut DbConnection<'_>, new: Self::New) -> QueryResult<Self>;

    /// Overwrite the fields set in `patch`, returning the row as stored or `None`
    /// if there is no row with the given key
    async fn apply_patch(
        conn: &mut DbConnection<'_>,
        id: i64,
        patch: Self::Patch,
    ) -> QueryResult<Option<Self>>;

    /// Delete a row, returning whether it existed
    async fn delete_by_id(conn: &mut DbConnection<'_>, id: i64) -> QueryResult<bool>;
}

/// Entity-agnostic data access.
///
/// `get_all` and `get_page` are the two forms of listing every row: the full
/// ordered sequence, or a single page of it with its metadata.
#[async_trait]
pub trait CrudOperations<E: Entity>: Send + Sync {
    /// Fetch by primary key
    async fn get(&self, id: i64) -> RepositoryResult<Option<E>>;

    /// Every row ordered by primary key
    async fn get_all(&self, order: SortOrder) -> RepositoryResult<Vec<E>>;

    /// One page of the rows ordered by primary key
    async fn get_page(&self, order: SortOrder, params: PageParams) -> RepositoryResult<Page<E>>;

    /// Persist a new row, returning it with generated fields populated
    async fn create(&self, new: E::New) -> RepositoryResult<E>;

    /// Overwrite the given fields of an existing row
    async fn update(&self, id: i64, patch: E::Patch) -> RepositoryResult<Option<E>>;

    /// Remove a row, `false` if it did not exist
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;
}
