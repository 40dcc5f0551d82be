use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cache::ContentKey;
use crate::content::ContentKind;

/// One unit of pre-generation work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub entity_type: String,
    pub entity_id: String,
    /// Prompt source handed to the generator unchanged.
    pub source_text: String,
    /// Opaque generator context (user profile, locale, and so on).
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl GenerationRequest {
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        source_text: impl Into<String>,
    ) -> Self {
        GenerationRequest {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            source_text: source_text.into(),
            context: Map::new(),
        }
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }

    /// The cache key this request targets for `kind`.
    pub fn key(&self, kind: ContentKind) -> ContentKey {
        ContentKey::new(self.entity_type.clone(), self.entity_id.clone(), kind)
    }
}

/// Lifecycle of one pre-generation request.
///
/// `Pending → CacheChecked → {Skipped | Generating → {Cached | Failed}}`;
/// only the terminal states appear in a [`PreGenerationReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Pending,
    CacheChecked,
    /// Already cached; nothing was generated.
    Skipped,
    Generating,
    /// Freshly generated and written through.
    Cached,
    /// Membership check or generation failed; siblings were unaffected.
    Failed,
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Skipped | RequestState::Cached | RequestState::Failed
        )
    }
}

/// Terminal state of one request, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOutcome {
    pub entity_type: String,
    pub entity_id: String,
    pub state: RequestState,
}

/// Summary of one pre-generation run.
///
/// `generated + skipped + failed` always equals the number of requests;
/// `outcomes` preserves input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreGenerationReport {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<RequestOutcome>,
}

impl PreGenerationReport {
    pub fn total(&self) -> usize {
        self.generated + self.skipped + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub(crate) fn record(&mut self, request: &GenerationRequest, state: RequestState) {
        match state {
            RequestState::Skipped => self.skipped += 1,
            RequestState::Cached => self.generated += 1,
            _ => self.failed += 1,
        }
        self.outcomes.push(RequestOutcome {
            entity_type: request.entity_type.clone(),
            entity_id: request.entity_id.clone(),
            state,
        });
    }
}
