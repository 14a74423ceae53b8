//! Redis-backed implementation of the todo cache seam.
//!
//! Entries are stored as JSON under `todo:{id}` with a server-side TTL
//! (`SET .. EX`), so expiry is enforced by Redis itself and an expired entry
//! is indistinguishable from one that was never written.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tokio::sync::Mutex;

use crate::application::cache::{CacheError, TodoCache};
use crate::domain::entities::TodoRecord;

pub struct RedisTodoCache {
    client: Client,
    // Established lazily so the service still starts when Redis is down;
    // once up, the manager reconnects on its own after outages.
    manager: Mutex<Option<ConnectionManager>>,
}

impl RedisTodoCache {
    pub fn new(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url).map_err(CacheError::backend)?;
        Ok(Self {
            client,
            manager: Mutex::new(None),
        })
    }

    fn key(id: i64) -> String {
        format!("todo:{id}")
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let mut slot = self.manager.lock().await;
        if let Some(manager) = slot.as_ref() {
            return Ok(manager.clone());
        }
        let manager = self
            .client
            .get_connection_manager()
            .await
            .map_err(CacheError::backend)?;
        *slot = Some(manager.clone());
        Ok(manager)
    }
}

#[async_trait]
impl TodoCache for RedisTodoCache {
    async fn put(&self, todo: &TodoRecord, ttl: Duration) -> Result<(), CacheError> {
        let payload = serde_json::to_string(todo).map_err(CacheError::codec)?;
        let mut conn = self.connection().await?;
        let ttl_secs = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(Self::key(todo.id), payload, ttl_secs)
            .await
            .map_err(CacheError::backend)
    }

    async fn get(&self, id: i64) -> Result<Option<TodoRecord>, CacheError> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn
            .get(Self::key(id))
            .await
            .map_err(CacheError::backend)?;

        match payload {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(CacheError::codec),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(Self::key(id))
            .await
            .map_err(CacheError::backend)
    }
}
