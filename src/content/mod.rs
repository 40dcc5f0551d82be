//! 内容模型模块：定义缓存载荷的类别、结构与写入边界校验。
//!
//! # Content Model Module
//!
//! Everything the cache stores is generator output: named sections of prose
//! or short lists, tagged with a [`ContentKind`]. The kind set is closed on
//! purpose — each kind carries its own minimal schema, enforced by
//! [`validator`] when a payload enters the cache, so a generator that drifts
//! off-contract is caught at the write boundary instead of at render time.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ContentKind`] | Closed payload-category enum (`overview`, `detail`, `insight`) |
//! | [`GeneratedContent`] | Generator output: sections plus a placeholder flag |
//! | [`SectionValue`] | One section — prose or a list of short items |
//! | [`RecommendationContent`] | Lenient consumer view with defaulted fields |
//! | [`validator`] | Fixed per-kind rules interpreted by a small evaluator |

mod kind;
mod model;
pub mod validator;

pub use kind::ContentKind;
pub use model::{GeneratedContent, RecommendationContent, SectionValue};
