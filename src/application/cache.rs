//! Cache seam for the todo service.
//!
//! The cache is a read accelerator only. Entries are disposable projections
//! of durable rows with a short per-entry TTL; they are never authoritative.
//! Callers cannot distinguish "never set" from "expired" — both read as
//! absent.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::TodoRecord;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unreachable: {0}")]
    Backend(String),
    #[error("cached payload could not be decoded: {0}")]
    Codec(String),
}

impl CacheError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }

    pub fn codec(err: impl std::fmt::Display) -> Self {
        Self::Codec(err.to_string())
    }
}

/// Key→serialized-record store with per-entry expiry.
///
/// Implementations are best-effort: every error returned here is absorbed by
/// the service layer (reads degrade to a miss, writes to a no-op) and never
/// reaches a caller.
#[async_trait]
pub trait TodoCache: Send + Sync {
    /// Store `todo` under its id, replacing any existing entry, expiring
    /// after `ttl`.
    async fn put(&self, todo: &TodoRecord, ttl: Duration) -> Result<(), CacheError>;

    /// Fetch a fresh entry, or `None` when absent or expired.
    async fn get(&self, id: i64) -> Result<Option<TodoRecord>, CacheError>;

    /// Drop any entry for `id`; succeeds when none exists.
    async fn delete(&self, id: i64) -> Result<(), CacheError>;
}
