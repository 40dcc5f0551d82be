//! 生成编排模块：缓存命中直接返回，未命中时单飞调用生成器。
//!
//! # Generate-or-Fetch Module
//!
//! Orchestrates "return cached content, or invoke the generator once and
//! cache the result". The generator is an expensive, rate-limited external
//! call, so two guarantees matter here: a warm key never invokes it, and a
//! cold key invokes it exactly once no matter how many callers arrive
//! concurrently (single-flight). Generation runs on a detached task, so a
//! caller that stops waiting never cancels work other callers will benefit
//! from.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ContentService`] | Facade: lookup, get-or-generate, forced refresh |
//! | [`ContentGenerator`] | Long-lived generator trait for pre-generation |
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ai_content_cache::cache::{ContentCache, ContentKey, MemoryStore};
//! use ai_content_cache::content::{ContentKind, GeneratedContent};
//! use ai_content_cache::generate::ContentService;
//!
//! # async fn demo() -> ai_content_cache::Result<()> {
//! let cache = Arc::new(ContentCache::new(Arc::new(MemoryStore::new())));
//! let service = ContentService::new(cache);
//!
//! let key = ContentKey::new("factor", "3", ContentKind::Overview);
//! let overview = service
//!     .get_or_generate(&key, || async {
//!         Ok::<_, String>(GeneratedContent::new().with_section("overview", "Cleanse, treat, protect."))
//!     })
//!     .await?;
//! assert_eq!(overview["sections"]["overview"], "Cleanse, treat, protect.");
//! # Ok(())
//! # }
//! ```
//!
//! Placeholder results (`placeholder: true`) are handed back to the caller
//! but never written to the cache, so the next request generates again.

mod generator;
mod inflight;
mod service;

pub use generator::ContentGenerator;
pub use service::ContentService;
