//! Todo CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use tracing::info;

use super::HttpState;
use super::error::ApiError;
use super::models::{TodoCreateRequest, TodoListQuery, TodoUpdateRequest};

pub async fn create_todo(
    State(state): State<HttpState>,
    Json(payload): Json<TodoCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.todos.create(payload.into()).await?;
    info!(id = todo.id, "create todo");
    Ok(Json(todo))
}

pub async fn read_todo(
    State(state): State<HttpState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.todos.read(id).await?;
    info!(id, "read todo");
    Ok(Json(todo))
}

pub async fn update_todo(
    State(state): State<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<TodoUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.todos.update(id, payload.into()).await?;
    info!(id, "update todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<HttpState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.todos.delete(id).await?;
    info!(id, "delete todo");
    Ok(Json(todo))
}

pub async fn list_todos(
    State(state): State<HttpState>,
    Query(query): Query<TodoListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let todos = state.todos.list(query.skip, query.limit).await?;
    info!(count = todos.len(), "list todos");
    Ok(Json(todos))
}
