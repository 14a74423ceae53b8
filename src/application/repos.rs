//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::TodoRecord;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateTodoParams {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Partial update applied under the row lock. `None` fields are left
/// untouched; this is a PATCH merge, never an overwrite.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Produce the record as it should look after applying this patch.
    pub fn apply_to(&self, record: &TodoRecord) -> TodoRecord {
        TodoRecord {
            id: record.id,
            title: self.title.clone().unwrap_or_else(|| record.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| record.description.clone()),
            completed: self.completed.unwrap_or(record.completed),
        }
    }
}

/// Durable storage for todo records. The store owns the canonical lifetime of
/// every record; callers never observe partially applied updates because
/// `update_locked` serializes writers on the row itself.
#[async_trait]
pub trait TodosRepo: Send + Sync {
    /// Insert a new row and return it with its store-assigned id.
    async fn create(&self, params: CreateTodoParams) -> Result<TodoRecord, RepoError>;

    /// Point lookup by primary key.
    async fn find(&self, id: i64) -> Result<Option<TodoRecord>, RepoError>;

    /// Apply `patch` under an exclusive row lock held for the duration of the
    /// surrounding transaction. Concurrent updates to the same id block until
    /// the first transaction commits or rolls back. Returns `None` when the
    /// row does not exist.
    async fn update_locked(
        &self,
        id: i64,
        patch: TodoPatch,
    ) -> Result<Option<TodoRecord>, RepoError>;

    /// Remove the row, returning the value that was deleted.
    async fn delete(&self, id: i64) -> Result<Option<TodoRecord>, RepoError>;

    /// Pagination view with stable ordering by primary key.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<TodoRecord>, RepoError>;
}
