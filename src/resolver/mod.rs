//! 推荐标识符解析模块：将历史上不一致的原始 ID 规范化为统一的缓存键。
//!
//! # Identifier Resolution Module
//!
//! Raw recommendation identifiers arrive in every shape the product has ever
//! emitted: `ai-analysis/factor/3`, `timeline-1`, `/observation/2`,
//! `ai-glow-boost-2`, URL-encoded paths, and ids carrying a trailing
//! testing-mode marker. This module turns any of them into one canonical
//! `(type, number)` pair and an ordered list of probe candidates, so the
//! cache can be hit regardless of which naming scheme wrote the entry.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`parse_recommendation_id`] | Total parser — any input yields a usable pair |
//! | [`ParsedIdentifier`] | Canonical `(type, number)` decomposition |
//! | [`variant_candidates`] | Ordered, deduplicated cache-probe candidates |
//! | [`IdentifierVariant`] | One `(entity_type, entity_id)` candidate |
//! | [`split_route_modifier`] | Strips the trailing mode marker, returning it explicitly |
//!
//! ## Example
//!
//! ```rust
//! use ai_content_cache::resolver::parse_recommendation_id;
//!
//! let parsed = parse_recommendation_id("ai-analysis/factor/3");
//! assert_eq!(parsed.recommendation_type, "factor");
//! assert_eq!(parsed.recommendation_number, "3");
//!
//! // Malformed input never fails, it falls back to the default pair.
//! let fallback = parse_recommendation_id("");
//! assert_eq!(fallback.recommendation_type, "recommendation");
//! assert_eq!(fallback.recommendation_number, "1");
//! ```
//!
//! Both parsing and variant generation are pure functions: no global state,
//! no I/O, and the route modifier is handed back to the caller instead of
//! being stashed in a process-wide flag.

mod parse;
mod variants;

pub use parse::{parse_recommendation_id, split_route_modifier, ParsedIdentifier, RouteModifier};
pub use variants::{variant_candidates, IdentifierVariant};

/// Fixed prefix marking AI-generated identifiers.
pub(crate) const AI_PREFIX: &str = "ai-";
/// Bare marker accepted as a whole identifier.
pub(crate) const AI_MARKER: &str = "ai";
/// Namespace prefix used by analysis routes.
pub(crate) const ANALYSIS_NAMESPACE: &str = "ai-analysis";
/// Path segment separator.
pub(crate) const PATH_SEPARATOR: char = '/';
/// Fallback type when nothing usable can be extracted.
pub(crate) const DEFAULT_TYPE: &str = "recommendation";
/// Fallback number when a segment is missing.
pub(crate) const DEFAULT_NUMBER: &str = "1";
