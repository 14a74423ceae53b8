//! Domain entities mirrored from persistent storage.

use serde::{Deserialize, Serialize};

/// A single todo item. The id is assigned by the record store on insert and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}
