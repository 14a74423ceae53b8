use async_trait::async_trait;

use crate::application::repos::{CreateTodoParams, RepoError, TodoPatch, TodosRepo};
use crate::domain::entities::TodoRecord;

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: String,
    completed: bool,
}

impl From<TodoRow> for TodoRecord {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed,
        }
    }
}

#[async_trait]
impl TodosRepo for PostgresRepositories {
    async fn create(&self, params: CreateTodoParams) -> Result<TodoRecord, RepoError> {
        let row = sqlx::query_as::<_, TodoRow>(
            "INSERT INTO todos (title, description, completed) \
             VALUES ($1, $2, $3) \
             RETURNING id, title, description, completed",
        )
        .bind(&params.title)
        .bind(&params.description)
        .bind(params.completed)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find(&self, id: i64) -> Result<Option<TodoRecord>, RepoError> {
        let row = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, description, completed FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(TodoRecord::from))
    }

    async fn update_locked(
        &self,
        id: i64,
        patch: TodoPatch,
    ) -> Result<Option<TodoRecord>, RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        // FOR UPDATE serializes concurrent updates on this row; the lock is
        // held until commit. Dropping the transaction on any early return
        // rolls back and releases it.
        let current = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, description, completed FROM todos WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let Some(current) = current else {
            return Ok(None);
        };

        let next = patch.apply_to(&TodoRecord::from(current));

        let row = sqlx::query_as::<_, TodoRow>(
            "UPDATE todos SET title = $2, description = $3, completed = $4 \
             WHERE id = $1 \
             RETURNING id, title, description, completed",
        )
        .bind(next.id)
        .bind(&next.title)
        .bind(&next.description)
        .bind(next.completed)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(Some(row.into()))
    }

    async fn delete(&self, id: i64) -> Result<Option<TodoRecord>, RepoError> {
        let row = sqlx::query_as::<_, TodoRow>(
            "DELETE FROM todos WHERE id = $1 \
             RETURNING id, title, description, completed",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(TodoRecord::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<TodoRecord>, RepoError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, description, completed FROM todos \
             ORDER BY id \
             OFFSET $1 LIMIT $2",
        )
        // Negative values are not valid OFFSET/LIMIT arguments; everything
        // else passes through, so limit 0 yields an empty page.
        .bind(offset.max(0))
        .bind(limit.max(0))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(TodoRecord::from).collect())
    }
}
