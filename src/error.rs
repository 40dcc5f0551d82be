use thiserror::Error;

use crate::content::ContentKind;

/// Unified error type for the content cache subsystem.
///
/// Cache misses are not errors — lookups return `Ok(None)`. The variants here
/// are the failures that must stay distinguishable: a broken backing store is
/// retryable and must never look like a miss, a failed generation caches
/// nothing, and a payload rejected at the cache boundary names the kind whose
/// schema it violated.
///
/// The enum is `Clone`: in-flight generation results are shared between
/// concurrent waiters (see [`crate::generate`]), so failures travel through
/// shared futures as values. Foreign errors are converted via their display
/// strings to preserve that property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The backing store is unreachable or failed mid-operation.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// The generator failed, or the task driving it was aborted.
    #[error("generation failed: {0}")]
    Generation(String),

    /// A payload failed its content kind's schema at the `put` boundary.
    #[error("invalid {kind} payload: {reason}")]
    Validation { kind: ContentKind, reason: String },

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a storage error from any displayable cause.
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a generation error from any displayable cause.
    pub fn generation(msg: impl Into<String>) -> Self {
        Error::Generation(msg.into())
    }

    /// Create a validation error for `kind`.
    pub fn validation(kind: ContentKind, reason: impl Into<String>) -> Self {
        Error::Validation {
            kind,
            reason: reason.into(),
        }
    }

    /// Whether retrying the same call can reasonably succeed.
    ///
    /// True only for storage failures; generation and validation failures
    /// are deterministic for the same inputs.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
