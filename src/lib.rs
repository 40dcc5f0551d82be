//! # ai-content-cache
//!
//! AI 生成内容缓存与推荐标识符解析库：命中即返回，未命中单飞生成。
//!
//! Cache and identifier-resolution layer for AI-generated recommendation
//! content. Raw identifiers arrive in every shape the product has ever
//! emitted; the expensive external generator is rate-limited and slow. This
//! crate turns any raw id into canonical lookup keys, serves previously
//! generated content without re-invoking the generator, generates on miss
//! exactly once per key even under concurrent access, and pre-populates the
//! cache for many items under a rate budget.
//!
//! ## Core Guarantees
//!
//! - **Total parsing**: any identifier string, however malformed, resolves to
//!   a usable `(type, number)` pair — never a panic, never an absent value
//! - **Misses are not errors**: a true miss is `Ok(None)`; a broken backing
//!   store is [`Error::Storage`] and the two are never conflated
//! - **Single-flight**: concurrent requests for the same cold key share one
//!   generation and one result
//! - **Share the work**: an abandoned caller drops only its own wait; the
//!   generation completes and populates the cache for later callers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ai_content_cache::cache::{ContentCache, MemoryStore};
//! use ai_content_cache::content::{ContentKind, GeneratedContent};
//! use ai_content_cache::generate::ContentService;
//!
//! #[tokio::main]
//! async fn main() -> ai_content_cache::Result<()> {
//!     let cache = Arc::new(ContentCache::new(Arc::new(MemoryStore::new())));
//!     let service = ContentService::new(cache);
//!
//!     // Any historical id shape resolves to the same cached row.
//!     let content = service
//!         .get_or_generate_raw("ai-analysis/factor/3", ContentKind::Overview, || async {
//!             // the expensive external call lives here
//!             Ok::<_, String>(
//!                 GeneratedContent::new().with_section("overview", "Cleanse, treat, protect."),
//!             )
//!         })
//!         .await?;
//!
//!     assert_eq!(content["sections"]["overview"], "Cleanse, treat, protect.");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`resolver`] | Total identifier parsing and cache-probe variant generation |
//! | [`content`] | Content kinds, payload model, put-boundary validation |
//! | [`cache`] | Composite-key cache over pluggable durable stores |
//! | [`generate`] | Get-or-generate orchestration with single-flight dedup |
//! | [`batch`] | Grouped, rate-budgeted cache pre-generation |

pub mod batch;
pub mod cache;
pub mod content;
pub mod generate;
pub mod resolver;

// Re-export the types most callers touch
pub use batch::{GenerationRequest, PreGenerationReport, PreGenerator, PreGeneratorConfig};
pub use cache::{CacheConfig, CacheEntry, ContentCache, ContentKey};
pub use content::{ContentKind, GeneratedContent, RecommendationContent};
pub use generate::{ContentGenerator, ContentService};
pub use resolver::{parse_recommendation_id, ParsedIdentifier};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
