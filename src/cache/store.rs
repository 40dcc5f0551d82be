use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{CacheEntry, ContentKey};
use crate::Result;

/// Durable backing store for generated content.
///
/// Implementations must make a completed [`upsert`](ContentStore::upsert)
/// visible to an immediately following [`select`](ContentStore::select) on
/// the same key from any caller, and must never report a missing row as an
/// error: absence is `Ok(None)`, failure is [`crate::Error::Storage`].
///
/// There is intentionally no delete — this subsystem only ever overwrites.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Reads the row for `key`, if any.
    async fn select(&self, key: &ContentKey) -> Result<Option<CacheEntry>>;

    /// Writes `entry`, replacing any existing row with the same key.
    async fn upsert(&self, entry: &CacheEntry) -> Result<()>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// In-process store backed by a `HashMap`.
///
/// The default for tests and single-process deployments without durability
/// requirements. Lock poisoning is recovered from rather than propagated:
/// the rows are plain data and stay consistent even if a holder panicked.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<ContentKey, (Value, DateTime<Utc>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows. Never panics, even on a poisoned lock.
    pub fn len(&self) -> usize {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn select(&self, key: &ContentKey) -> Result<Option<CacheEntry>> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .get(key)
            .map(|(content, updated_at)| CacheEntry::new(key.clone(), content.clone(), *updated_at)))
    }

    async fn upsert(&self, entry: &CacheEntry) -> Result<()> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        rows.insert(entry.key.clone(), (entry.content.clone(), entry.updated_at));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Store that never hits and never retains anything.
///
/// Wiring this in disables caching end to end without touching call sites.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

#[async_trait]
impl ContentStore for NullStore {
    async fn select(&self, _key: &ContentKey) -> Result<Option<CacheEntry>> {
        Ok(None)
    }

    async fn upsert(&self, _entry: &CacheEntry) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
