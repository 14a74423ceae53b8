//! In-memory doubles for the record store and cache seams.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use appunto::application::cache::{CacheError, TodoCache};
use appunto::application::repos::{CreateTodoParams, RepoError, TodoPatch, TodosRepo};
use appunto::domain::entities::TodoRecord;

#[derive(Default)]
struct MemoryTable {
    next_id: i64,
    rows: BTreeMap<i64, TodoRecord>,
}

/// Record-store double. A single async mutex held across the whole
/// read-modify-write in `update_locked` stands in for the row lock: the
/// in-lock delay widens the race window so an unserialized implementation
/// would lose updates.
pub struct MemoryRepo {
    table: Mutex<MemoryTable>,
    find_calls: AtomicUsize,
    update_delay: Duration,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(MemoryTable::default()),
            find_calls: AtomicUsize::new(0),
            update_delay: Duration::ZERO,
        }
    }

    pub fn with_update_delay(delay: Duration) -> Self {
        Self {
            update_delay: delay,
            ..Self::new()
        }
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodosRepo for MemoryRepo {
    async fn create(&self, params: CreateTodoParams) -> Result<TodoRecord, RepoError> {
        let mut table = self.table.lock().await;
        table.next_id += 1;
        let todo = TodoRecord {
            id: table.next_id,
            title: params.title,
            description: params.description,
            completed: params.completed,
        };
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find(&self, id: i64) -> Result<Option<TodoRecord>, RepoError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update_locked(
        &self,
        id: i64,
        patch: TodoPatch,
    ) -> Result<Option<TodoRecord>, RepoError> {
        let mut table = self.table.lock().await;
        let Some(current) = table.rows.get(&id).cloned() else {
            return Ok(None);
        };
        if !self.update_delay.is_zero() {
            tokio::time::sleep(self.update_delay).await;
        }
        let next = patch.apply_to(&current);
        table.rows.insert(id, next.clone());
        Ok(Some(next))
    }

    async fn delete(&self, id: i64) -> Result<Option<TodoRecord>, RepoError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.remove(&id))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<TodoRecord>, RepoError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

/// Cache double with real per-entry expiry.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<BTreeMap<i64, (TodoRecord, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, id: i64) -> bool {
        let entries = self.entries.lock().await;
        entries
            .get(&id)
            .is_some_and(|(_, expires_at)| *expires_at > Instant::now())
    }
}

#[async_trait]
impl TodoCache for MemoryCache {
    async fn put(&self, todo: &TodoRecord, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        entries.insert(todo.id, (todo.clone(), Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Option<TodoRecord>, CacheError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(&id).and_then(|(todo, expires_at)| {
            (*expires_at > Instant::now()).then(|| todo.clone())
        }))
    }

    async fn delete(&self, id: i64) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        entries.remove(&id);
        Ok(())
    }
}

/// Cache double that fails every call, simulating an unreachable backend.
#[derive(Default)]
pub struct FailingCache;

#[async_trait]
impl TodoCache for FailingCache {
    async fn put(&self, _todo: &TodoRecord, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::backend("connection refused"))
    }

    async fn get(&self, _id: i64) -> Result<Option<TodoRecord>, CacheError> {
        Err(CacheError::backend("connection refused"))
    }

    async fn delete(&self, _id: i64) -> Result<(), CacheError> {
        Err(CacheError::backend("connection refused"))
    }
}
