use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, warn};

use super::inflight::{FlightFuture, InFlightRegistry};
use crate::cache::{ContentCache, ContentKey};
use crate::content::{ContentKind, GeneratedContent};
use crate::resolver::{parse_recommendation_id, variant_candidates};
use crate::{Error, Result};

/// Facade over the cache and the single-flight registry.
///
/// Every read probes the resolver-produced variants in order, so content
/// written under a legacy naming scheme still hits. Every generation runs on
/// a detached task: a caller that stops waiting drops only its own wait,
/// never the generation, and later callers find the result in the cache.
pub struct ContentService {
    cache: Arc<ContentCache>,
    inflight: Arc<InFlightRegistry>,
}

impl ContentService {
    pub fn new(cache: Arc<ContentCache>) -> Self {
        ContentService {
            cache,
            inflight: Arc::new(InFlightRegistry::new()),
        }
    }

    /// The underlying cache, for stats and direct point access.
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Probes all variants of `key`, first hit wins. No generation.
    pub async fn lookup(&self, key: &ContentKey) -> Result<Option<Value>> {
        let variants = variant_candidates(&key.entity_type, &key.entity_id, &key.canonical_raw());
        self.probe(&variants, key.kind).await
    }

    /// Parses `raw_id` and probes all its variants, first hit wins.
    pub async fn lookup_raw(&self, raw_id: &str, kind: ContentKind) -> Result<Option<Value>> {
        let parsed = parse_recommendation_id(raw_id);
        self.probe(&parsed.variants(raw_id), kind).await
    }

    /// Returns the cached content for `key`, generating it exactly once on a
    /// total miss.
    ///
    /// Concurrent calls for the same cold key share one generation and all
    /// receive the same result — including a failure, which is shared as a
    /// cloned [`Error`] and caches nothing. A successful `put` that fails at
    /// the store propagates [`Error::Storage`].
    pub async fn get_or_generate<F, Fut, E>(&self, key: &ContentKey, generator: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<GeneratedContent, E>> + Send + 'static,
        E: Display,
    {
        if let Some(content) = self.lookup(key).await? {
            return Ok(content);
        }
        self.generate_single_flight(key, generator).await
    }

    /// Raw-id entry point: parse, probe every variant (including literal
    /// re-splits of `raw_id`), generate under the canonical key on miss.
    pub async fn get_or_generate_raw<F, Fut, E>(
        &self,
        raw_id: &str,
        kind: ContentKind,
        generator: F,
    ) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<GeneratedContent, E>> + Send + 'static,
        E: Display,
    {
        let parsed = parse_recommendation_id(raw_id);
        if let Some(content) = self.probe(&parsed.variants(raw_id), kind).await? {
            return Ok(content);
        }
        let key = ContentKey::new(
            parsed.recommendation_type.clone(),
            parsed.recommendation_number.clone(),
            kind,
        );
        self.generate_single_flight(&key, generator).await
    }

    /// Unconditionally regenerates the content for `key`.
    ///
    /// The cache-read step is bypassed; on success the entry is overwritten,
    /// on failure it is left untouched. Forced refreshes do not join the
    /// in-flight registry: a refresh must always run its own generation, and
    /// a concurrent regular generation simply races through the same
    /// last-write-wins upsert.
    pub async fn force_refresh<F, Fut, E>(&self, key: &ContentKey, generator: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<GeneratedContent, E>> + Send + 'static,
        E: Display,
    {
        let cache = self.cache.clone();
        let key = key.clone();
        let fut = generator();
        let handle = tokio::spawn(async move { drive_generation(cache, key, fut).await });
        await_detached(handle).await
    }

    async fn probe(
        &self,
        variants: &[crate::resolver::IdentifierVariant],
        kind: ContentKind,
    ) -> Result<Option<Value>> {
        for variant in variants {
            let key = ContentKey::from_variant(variant, kind);
            if let Some(content) = self.cache.get(&key).await? {
                debug!(%key, "variant probe hit");
                return Ok(Some(content));
            }
        }
        Ok(None)
    }

    /// Installs or joins the pending generation for `key` and awaits it.
    async fn generate_single_flight<F, Fut, E>(&self, key: &ContentKey, generator: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<GeneratedContent, E>> + Send + 'static,
        E: Display,
    {
        let (flight, installed) = self.inflight.join_or_install(key, || {
            let cache = self.cache.clone();
            let registry = self.inflight.clone();
            let key = key.clone();
            let fut = generator();
            // Detached: abandoning every waiter must not cancel the work.
            let handle = tokio::spawn(async move {
                let result = drive_generation(cache, key.clone(), fut).await;
                registry.clear(&key);
                result
            });
            make_flight(handle)
        });
        if !installed {
            debug!(%key, "joining in-flight generation");
        }
        flight.await
    }
}

/// Runs one generation to completion and writes the result through.
async fn drive_generation<Fut, E>(
    cache: Arc<ContentCache>,
    key: ContentKey,
    fut: Fut,
) -> Result<Value>
where
    Fut: Future<Output = std::result::Result<GeneratedContent, E>>,
    E: Display,
{
    debug!(%key, "generation started");
    let content = match fut.await {
        Ok(content) => content,
        Err(e) => {
            warn!(%key, error = %e, "generation failed");
            return Err(Error::generation(e.to_string()));
        }
    };
    let value = content.to_value()?;
    if content.placeholder {
        debug!(%key, "placeholder content, returning without caching");
        return Ok(value);
    }
    cache.put(&key, value.clone()).await?;
    debug!(%key, "generation cached");
    Ok(value)
}

fn make_flight(handle: tokio::task::JoinHandle<Result<Value>>) -> FlightFuture {
    async move {
        match handle.await {
            Ok(result) => result,
            Err(e) => Err(Error::generation(format!("generation task aborted: {e}"))),
        }
    }
    .boxed()
    .shared()
}

async fn await_detached(handle: tokio::task::JoinHandle<Result<Value>>) -> Result<Value> {
    match handle.await {
        Ok(result) => result,
        Err(e) => Err(Error::generation(format!("generation task aborted: {e}"))),
    }
}
