use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::request::{GenerationRequest, PreGenerationReport, RequestState};
use crate::content::ContentKind;
use crate::generate::{ContentGenerator, ContentService};

/// Pacing for one pre-generation run.
#[derive(Debug, Clone)]
pub struct PreGeneratorConfig {
    /// Items processed concurrently per group.
    pub group_size: usize,
    /// Minimum pause between consecutive groups.
    pub group_delay: Duration,
}

impl Default for PreGeneratorConfig {
    fn default() -> Self {
        PreGeneratorConfig {
            group_size: 3,
            group_delay: Duration::from_millis(1000),
        }
    }
}

impl PreGeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group size, clamped to at least 1.
    pub fn with_group_size(mut self, size: usize) -> Self {
        self.group_size = size.max(1);
        self
    }

    pub fn with_group_delay(mut self, delay: Duration) -> Self {
        self.group_delay = delay;
        self
    }
}

/// Drives [`ContentService::get_or_generate`] over many items under a rate
/// budget.
///
/// Groups run sequentially; items within a group run concurrently, so at most
/// `group_size` generations are in flight at any instant. The inter-group
/// delay is a minimum, not an exact interval. Per-item failures are isolated:
/// they count as `failed` in the report and never abort siblings or later
/// groups — nothing here is fatal to the process.
pub struct PreGenerator {
    service: Arc<ContentService>,
    generator: Arc<dyn ContentGenerator>,
    kind: ContentKind,
    config: PreGeneratorConfig,
}

impl PreGenerator {
    pub fn new(
        service: Arc<ContentService>,
        generator: Arc<dyn ContentGenerator>,
        kind: ContentKind,
    ) -> Self {
        Self::with_config(service, generator, kind, PreGeneratorConfig::default())
    }

    pub fn with_config(
        service: Arc<ContentService>,
        generator: Arc<dyn ContentGenerator>,
        kind: ContentKind,
        config: PreGeneratorConfig,
    ) -> Self {
        PreGenerator {
            service,
            generator,
            kind,
            config,
        }
    }

    /// Processes `requests` in input order and reports per-item outcomes.
    pub async fn pre_generate_many(&self, requests: &[GenerationRequest]) -> PreGenerationReport {
        let mut report = PreGenerationReport::default();
        let groups: Vec<&[GenerationRequest]> = requests.chunks(self.config.group_size).collect();
        let group_count = groups.len();

        for (index, group) in groups.into_iter().enumerate() {
            debug!(
                group = index + 1,
                of = group_count,
                size = group.len(),
                "pre-generation group started"
            );
            let states = join_all(group.iter().map(|request| self.run_request(request))).await;
            for (request, state) in group.iter().zip(states) {
                report.record(request, state);
            }
            if index + 1 < group_count {
                sleep(self.config.group_delay).await;
            }
        }

        info!(
            total = report.total(),
            generated = report.generated,
            skipped = report.skipped,
            failed = report.failed,
            "pre-generation run finished"
        );
        report
    }

    /// Runs one request through its state machine to a terminal state.
    async fn run_request(&self, request: &GenerationRequest) -> RequestState {
        let key = request.key(self.kind);

        // Pending → CacheChecked
        match self.service.lookup(&key).await {
            Ok(Some(_)) => return RequestState::Skipped,
            Ok(None) => {}
            Err(e) => {
                warn!(%key, error = %e, "membership check failed, skipping generation");
                return RequestState::Failed;
            }
        }

        // CacheChecked → Generating
        let generator = self.generator.clone();
        let prompt = request.source_text.clone();
        let context = request.context.clone();
        let result = self
            .service
            .get_or_generate(&key, move || async move {
                generator.generate(&prompt, &context).await
            })
            .await;

        match result {
            Ok(_) => RequestState::Cached,
            Err(e) => {
                warn!(%key, error = %e, "pre-generation item failed");
                RequestState::Failed
            }
        }
    }
}
