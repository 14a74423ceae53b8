//! Request DTOs for the todo API.
//!
//! Responses serialize `TodoRecord` directly; its serde shape
//! `{id, title, description, completed}` is the wire contract.

use serde::Deserialize;

use crate::application::repos::{CreateTodoParams, TodoPatch};

#[derive(Debug, Deserialize)]
pub struct TodoCreateRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl From<TodoCreateRequest> for CreateTodoParams {
    fn from(req: TodoCreateRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            completed: req.completed,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TodoUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl From<TodoUpdateRequest> for TodoPatch {
    fn from(req: TodoUpdateRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            completed: req.completed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TodoListQuery {
    pub skip: i64,
    pub limit: i64,
}

impl Default for TodoListQuery {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}
