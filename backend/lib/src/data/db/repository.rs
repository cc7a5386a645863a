//! SQLite repository implementation.
//!
//! ## Key Components
//! - [`Repository`] - SQLite implementation of [`CrudOperations`] for any [`Entity`]
//!
//! ## Features
//! - Connection pooling through SmartPool
//! - One connection per operation, released before returning

use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use tracing::debug;

use super::{
    error::RepositoryResult,
    page::{paginate, Page, PageParams},
    pool::SmartPool,
    CrudOperations, Entity, SortOrder,
};

/// Generic repository over the table of `E`.
pub struct Repository<E> {
    pool: Arc<SmartPool>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Repository<E> {
    /// Create a new Repository backed by the given pool.
    pub fn new(pool: Arc<SmartPool>) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> CrudOperations<E> for Repository<E> {
    async fn get(&self, id: i64) -> RepositoryResult<Option<E>> {
        let mut conn = self.pool.get().await?;
        Ok(E::find_by_id(&mut conn, id).await?)
    }

    async fn get_all(&self, order: SortOrder) -> RepositoryResult<Vec<E>> {
        let mut conn = self.pool.get().await?;
        Ok(E::load_ordered(&mut conn, order, None).await?)
    }

    async fn get_page(&self, order: SortOrder, params: PageParams) -> RepositoryResult<Page<E>> {
        let mut conn = self.pool.get().await?;
        paginate(&mut conn, order, params).await
    }

    async fn create(&self, new: E::New) -> RepositoryResult<E> {
        let mut conn = self.pool.get().await?;
        let created = E::insert(&mut conn, new).await?;

        debug!(target: "db::repository", entity = E::NAME, id = created.id(), "Created row");
        Ok(created)
    }

    async fn update(&self, id: i64, patch: E::Patch) -> RepositoryResult<Option<E>> {
        let mut conn = self.pool.get().await?;
        Ok(E::apply_patch(&mut conn, id, patch).await?)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let mut conn = self.pool.get().await?;
        let deleted = E::delete_by_id(&mut conn, id).await?;

        debug!(target: "db::repository", entity = E::NAME, id, deleted, "Deleted row");
        Ok(deleted)
    }
}
