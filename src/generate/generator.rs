use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::content::GeneratedContent;
use crate::Result;

/// Long-lived content generator.
///
/// The generator is consumed as an opaque async function: prompt
/// construction and model choice live behind this seam. Implementations are
/// assumed slow (seconds) and externally rate-limited; batch pre-generation
/// paces its calls accordingly. A failure must surface as an error, never as
/// empty content — "not enough data yet" is a successful generation with the
/// `placeholder` flag set.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates content for `prompt` with caller-supplied `context`.
    async fn generate(&self, prompt: &str, context: &Map<String, Value>)
        -> Result<GeneratedContent>;
}
