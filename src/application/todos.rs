//! Cache-aside orchestration over the todo record store.
//!
//! The service is a stateless composition of the record store and the cache:
//! reads go cache-first and fall back to the store on miss, writes go to the
//! store first and then refresh or evict the cache entry. The store is the
//! single source of truth; a total cache outage costs latency, never
//! correctness.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::cache::{CacheError, TodoCache};
use crate::application::repos::{CreateTodoParams, RepoError, TodoPatch, TodosRepo};
use crate::domain::entities::TodoRecord;

pub const METRIC_CACHE_HIT: &str = "appunto_cache_hit_total";
pub const METRIC_CACHE_MISS: &str = "appunto_cache_miss_total";
pub const METRIC_CACHE_ERROR: &str = "appunto_cache_error_total";

#[derive(Debug, Error)]
pub enum TodoServiceError {
    #[error("todo not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] RepoError),
}

#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodosRepo>,
    cache: Arc<dyn TodoCache>,
    ttl: Duration,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodosRepo>, cache: Arc<dyn TodoCache>, ttl: Duration) -> Self {
        Self { repo, cache, ttl }
    }

    /// Insert a new record, then populate the cache with the stored value.
    /// Population happens after the durable write so a crash in between
    /// leaves the cache empty, which reads treat as a miss.
    pub async fn create(&self, params: CreateTodoParams) -> Result<TodoRecord, TodoServiceError> {
        let todo = self.repo.create(params).await?;
        self.fill(&todo).await;
        debug!(id = todo.id, "created todo");
        Ok(todo)
    }

    /// Cache-first read. A hit returns without consulting the store, so a
    /// stale entry masks a concurrent durable update until it expires; that
    /// staleness window is bounded by the configured TTL. Absence is not
    /// cached: repeated misses re-check the store every time.
    pub async fn read(&self, id: i64) -> Result<TodoRecord, TodoServiceError> {
        if let Some(todo) = self.lookup(id).await {
            counter!(METRIC_CACHE_HIT).increment(1);
            debug!(id, "todo served from cache");
            return Ok(todo);
        }
        counter!(METRIC_CACHE_MISS).increment(1);

        let todo = self
            .repo
            .find(id)
            .await?
            .ok_or(TodoServiceError::NotFound)?;
        self.fill(&todo).await;
        Ok(todo)
    }

    /// Apply a partial update under the store's row lock, then overwrite the
    /// cache entry with the full post-update record. The overwrite replaces
    /// the entry wholesale; external readers see either the old value, the
    /// new value, or a plain miss, never a partial merge.
    pub async fn update(&self, id: i64, patch: TodoPatch) -> Result<TodoRecord, TodoServiceError> {
        let todo = self
            .repo
            .update_locked(id, patch)
            .await?
            .ok_or(TodoServiceError::NotFound)?;
        self.fill(&todo).await;
        debug!(id, "updated todo");
        Ok(todo)
    }

    /// Remove the row, then drop the cache entry unconditionally, whether or
    /// not one existed.
    pub async fn delete(&self, id: i64) -> Result<TodoRecord, TodoServiceError> {
        let todo = self
            .repo
            .delete(id)
            .await?
            .ok_or(TodoServiceError::NotFound)?;
        self.evict(id).await;
        debug!(id, "deleted todo");
        Ok(todo)
    }

    /// Ranged reads always go to the store; the cache is keyed by single
    /// entity id and holds no representation for paginated queries.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<TodoRecord>, TodoServiceError> {
        Ok(self.repo.list(offset, limit).await?)
    }

    async fn lookup(&self, id: i64) -> Option<TodoRecord> {
        match self.cache.get(id).await {
            Ok(entry) => entry,
            Err(err) => {
                self.note_cache_failure("get", id, &err);
                None
            }
        }
    }

    async fn fill(&self, todo: &TodoRecord) {
        if let Err(err) = self.cache.put(todo, self.ttl).await {
            self.note_cache_failure("put", todo.id, &err);
        }
    }

    async fn evict(&self, id: i64) {
        if let Err(err) = self.cache.delete(id).await {
            self.note_cache_failure("delete", id, &err);
        }
    }

    fn note_cache_failure(&self, op: &'static str, id: i64, err: &CacheError) {
        counter!(METRIC_CACHE_ERROR).increment(1);
        warn!(op, id, error = %err, "cache unavailable, degrading to store-only");
    }
}
