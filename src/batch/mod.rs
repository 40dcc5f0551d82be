//! 批量预生成模块：按速率预算分组预热缓存。
//!
//! # Batch Pre-Generation Module
//!
//! Warms the cache for many items ahead of user demand. Requests are
//! processed in fixed-size groups: membership checks and generations run
//! concurrently within a group, groups run sequentially with a minimum delay
//! between them, keeping the call rate inside the external generator's rate
//! limit. A failing item never aborts its siblings or later groups.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`PreGenerator`] | Drives grouped pre-generation over a [`ContentService`](crate::generate::ContentService) |
//! | [`PreGeneratorConfig`] | Group size and inter-group delay |
//! | [`GenerationRequest`] | One unit of pre-generation work |
//! | [`RequestState`] | Per-request lifecycle, terminal states in the report |
//! | [`PreGenerationReport`] | Generated/skipped/failed counts plus ordered outcomes |
//!
//! ## Example
//!
//! ```rust,no_run
//! use ai_content_cache::batch::{GenerationRequest, PreGeneratorConfig};
//! use std::time::Duration;
//!
//! let config = PreGeneratorConfig::new()
//!     .with_group_size(3)
//!     .with_group_delay(Duration::from_millis(1000));
//! let request = GenerationRequest::new("factor", "3", "User logs three flare-ups a week.");
//! ```

mod request;
mod runner;

pub use request::{GenerationRequest, PreGenerationReport, RequestOutcome, RequestState};
pub use runner::{PreGenerator, PreGeneratorConfig};
