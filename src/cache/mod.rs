//! 内容缓存模块：基于持久化存储的生成内容点查/写入。
//!
//! # Content Cache Module
//!
//! Point get/put over a durable backing store, keyed by the composite triple
//! `(entity_id, entity_type, kind)`. The store enforces key uniqueness as an
//! upsert conflict target; this layer adds freshness judgement, per-kind
//! payload validation on write, and hit/miss statistics. Entries are never
//! deleted or expired by this subsystem — staleness is decided at read time
//! and a stale row simply reads as a miss until the next overwrite.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ContentCache`] | High-level get/put with freshness window and statistics |
//! | [`CacheConfig`] | Enable flag, freshness window, entry size limit |
//! | [`ContentStore`] | Trait for pluggable backing stores |
//! | [`MemoryStore`] | In-process store for tests and single-process use |
//! | [`NullStore`] | No-op store that disables caching end to end |
//! | [`SqliteStore`] | Durable SQLite store with composite-key upsert |
//! | [`ContentKey`] / [`CacheEntry`] | Composite key and stored row |
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use ai_content_cache::cache::{CacheConfig, ContentCache, MemoryStore};
//!
//! let config = CacheConfig::new().with_freshness_window(Duration::from_secs(24 * 3600));
//! let cache = ContentCache::with_config(Arc::new(MemoryStore::new()), config);
//! ```
//!
//! A miss is `Ok(None)`; a broken store is [`crate::Error::Storage`]. The two
//! are never conflated, so callers can retry storage failures without
//! regenerating content that may well still be cached.

mod key;
mod manager;
mod sqlite;
mod store;

pub use key::{CacheEntry, ContentKey};
pub use manager::{CacheConfig, CacheStats, ContentCache};
pub use sqlite::SqliteStore;
pub use store::{ContentStore, MemoryStore, NullStore};
