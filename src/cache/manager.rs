//! Cache manager: freshness judgement, put-boundary validation, statistics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use super::key::{CacheEntry, ContentKey};
use super::store::ContentStore;
use crate::content::validator::validate_payload;
use crate::{Error, Result};

/// Behavioral knobs for [`ContentCache`]. Builder-style, no ambient reads.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// When false, every `get` misses and every `put` is a no-op; the store
    /// is never touched.
    pub enabled: bool,
    /// Entries older than this window read as misses. `None` never goes
    /// stale.
    pub freshness_window: Option<Duration>,
    /// Payloads whose JSON encoding exceeds this are not stored.
    pub max_entry_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            enabled: true,
            freshness_window: None,
            max_entry_bytes: 1024 * 1024,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = Some(window);
        self
    }

    pub fn with_max_entry_bytes(mut self, bytes: usize) -> Self {
        self.max_entry_bytes = bytes;
        self
    }
}

/// Monotonic counter snapshot. `stale` counts reads that found a row but
/// judged it too old to serve; those also count as misses for callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stale: u64,
    pub puts: u64,
    pub errors: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
    puts: AtomicU64,
    errors: AtomicU64,
}

impl AtomicStats {
    fn new() -> Self {
        AtomicStats {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stale: AtomicU64::new(0),
            puts: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Point get/put over a durable backing store.
///
/// A miss is `Ok(None)`; a broken store surfaces as [`Error::Storage`]. The
/// entry written by a completed [`put`](ContentCache::put) is visible to an
/// immediately following [`get`](ContentCache::get) on the same key from any
/// caller — the store's upsert is the only write path and the store is the
/// single source of truth.
pub struct ContentCache {
    config: CacheConfig,
    store: Arc<dyn ContentStore>,
    stats: Arc<AtomicStats>,
}

impl ContentCache {
    /// Cache over `store` with default configuration.
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self::with_config(store, CacheConfig::default())
    }

    pub fn with_config(store: Arc<dyn ContentStore>, config: CacheConfig) -> Self {
        ContentCache {
            config,
            store,
            stats: Arc::new(AtomicStats::new()),
        }
    }

    /// Reads the payload for `key`, applying the configured freshness window.
    pub async fn get(&self, key: &ContentKey) -> Result<Option<Value>> {
        self.get_within(key, self.config.freshness_window).await
    }

    /// Reads the payload for `key` with a per-call freshness window,
    /// overriding the configured one. A stale row reads as a miss but is
    /// never deleted; the next `put` overwrites it.
    pub async fn get_within(
        &self,
        key: &ContentKey,
        window: Option<Duration>,
    ) -> Result<Option<Value>> {
        if !self.config.enabled {
            return Ok(None);
        }
        match self.store.select(key).await {
            Ok(Some(entry)) => {
                if entry.is_fresh(Utc::now(), window) {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(%key, store = self.store.name(), "cache hit");
                    Ok(Some(entry.content))
                } else {
                    self.stats.stale.fetch_add(1, Ordering::Relaxed);
                    self.stats.misses.fetch_add(1, Ordering::Relaxed);
                    debug!(%key, "cache entry stale, treating as miss");
                    Ok(None)
                }
            }
            Ok(None) => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                debug!(%key, store = self.store.name(), "cache miss");
                Ok(None)
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    /// Reads the full stored row for `key`, including `updated_at`,
    /// bypassing the freshness window.
    pub async fn entry(&self, key: &ContentKey) -> Result<Option<CacheEntry>> {
        if !self.config.enabled {
            return Ok(None);
        }
        match self.store.select(key).await {
            Ok(entry) => Ok(entry),
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    /// Validates `content` against the key's kind and upserts it.
    ///
    /// Last write wins; `updated_at` is always refreshed. Oversized payloads
    /// are skipped (logged, `Ok`) rather than stored truncated.
    pub async fn put(&self, key: &ContentKey, content: Value) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }
        if let Err(issues) = validate_payload(key.kind, &content) {
            self.stats.errors.fetch_add(1, Ordering::Relaxed);
            warn!(%key, ?issues, "rejecting payload at the cache boundary");
            return Err(Error::validation(key.kind, issues.join("; ")));
        }
        let encoded_len = serde_json::to_vec(&content)?.len();
        if encoded_len > self.config.max_entry_bytes {
            warn!(
                %key,
                bytes = encoded_len,
                limit = self.config.max_entry_bytes,
                "payload exceeds entry size limit, not storing"
            );
            return Ok(());
        }
        let entry = CacheEntry::new(key.clone(), content, Utc::now());
        match self.store.upsert(&entry).await {
            Ok(()) => {
                self.stats.puts.fetch_add(1, Ordering::Relaxed);
                debug!(%key, store = self.store.name(), "cache put");
                Ok(())
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    /// Snapshot of the monotonic counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }
}
