//! Integration tests for the generate-or-fetch flow.
//!
//! Covers the flow-level guarantees: a warm key never invokes the generator,
//! a cold key invokes it exactly once even under concurrency, failures cache
//! nothing and are shared, and abandoned callers never cancel a generation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::{sleep, timeout};

use ai_content_cache::cache::{CacheEntry, ContentCache, ContentKey, ContentStore, MemoryStore};
use ai_content_cache::content::{ContentKind, GeneratedContent};
use ai_content_cache::generate::ContentService;
use ai_content_cache::{Error, Result};

fn service() -> Arc<ContentService> {
    Arc::new(ContentService::new(Arc::new(ContentCache::new(Arc::new(
        MemoryStore::new(),
    )))))
}

fn key(ty: &str, id: &str) -> ContentKey {
    ContentKey::new(ty, id, ContentKind::Overview)
}

fn content(text: &str) -> GeneratedContent {
    GeneratedContent::new().with_section("overview", text)
}

#[tokio::test]
async fn cold_key_generates_once_and_matches_a_plain_get() {
    let service = service();
    let calls = Arc::new(AtomicUsize::new(0));

    let counted = calls.clone();
    let generated = service
        .get_or_generate(&key("factor", "3"), move || async move {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(content("Generated once."))
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let cached = service.cache().get(&key("factor", "3")).await.unwrap();
    assert_eq!(cached, Some(generated));
}

#[tokio::test]
async fn five_concurrent_callers_share_one_generation() {
    let service = service();
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..5 {
        let service = service.clone();
        let calls = calls.clone();
        handles.push(tokio::spawn(async move {
            service
                .get_or_generate(&key("factor", "3"), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    // slow enough that all five overlap
                    sleep(Duration::from_millis(100)).await;
                    Ok::<_, String>(content("Shared."))
                })
                .await
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1, "exactly one generation");
    for result in &results[1..] {
        assert_eq!(result, &results[0], "all callers see the same content");
    }
}

#[tokio::test]
async fn concurrent_failures_are_shared_and_cache_nothing() {
    let service = service();
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..3 {
        let service = service.clone();
        let calls = calls.clone();
        handles.push(tokio::spawn(async move {
            service
                .get_or_generate(&key("factor", "9"), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    sleep(Duration::from_millis(50)).await;
                    Err::<GeneratedContent, _>("model overloaded")
                })
                .await
        }));
    }

    for handle in handles {
        let err = handle.await.unwrap().unwrap_err();
        assert_eq!(err, Error::Generation("model overloaded".into()));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1, "the failure was shared");
    assert_eq!(service.cache().get(&key("factor", "9")).await.unwrap(), None);

    // a later, non-overlapping call starts fresh
    let recovered = service
        .get_or_generate(&key("factor", "9"), || async {
            Ok::<_, String>(content("Recovered."))
        })
        .await
        .unwrap();
    assert_eq!(recovered["sections"]["overview"], json!("Recovered."));
}

#[tokio::test]
async fn abandoned_caller_does_not_cancel_the_generation() {
    let service = service();
    let calls = Arc::new(AtomicUsize::new(0));

    let counted = calls.clone();
    let abandoned_key = key("factor", "3");
    let wait = service.get_or_generate(&abandoned_key, move || async move {
        counted.fetch_add(1, Ordering::SeqCst);
        sleep(Duration::from_millis(150)).await;
        Ok::<_, String>(content("Finished anyway."))
    });

    // the caller gives up long before generation completes
    assert!(timeout(Duration::from_millis(20), wait).await.is_err());

    sleep(Duration::from_millis(300)).await;
    let cached = service.cache().get(&abandoned_key).await.unwrap();
    assert_eq!(
        cached.map(|v| v["sections"]["overview"].clone()),
        Some(json!("Finished anyway."))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn force_refresh_regenerates_over_a_warm_key() {
    let service = service();
    let calls = Arc::new(AtomicUsize::new(0));

    let counted = calls.clone();
    service
        .get_or_generate(&key("timeline", "1"), move || async move {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(content("First."))
        })
        .await
        .unwrap();

    let counted = calls.clone();
    let refreshed = service
        .force_refresh(&key("timeline", "1"), move || async move {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(content("Second."))
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2, "refresh always generates");
    assert_eq!(refreshed["sections"]["overview"], json!("Second."));
    let cached = service.cache().get(&key("timeline", "1")).await.unwrap().unwrap();
    assert_eq!(cached["sections"]["overview"], json!("Second."));
}

#[tokio::test]
async fn legacy_rows_hit_through_raw_identifiers() {
    let service = service();

    // row written under the historical ai meta-type naming
    service
        .cache()
        .put(
            &key("ai", "factor-3"),
            json!({"sections": {"overview": "Legacy row."}}),
        )
        .await
        .unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let found = service
        .get_or_generate_raw("ai-factor-3", ContentKind::Overview, move || async move {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(content("Unwanted."))
        })
        .await
        .unwrap();

    assert_eq!(found["sections"]["overview"], json!("Legacy row."));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // the same row also answers the path-shaped id
    let via_path = service
        .lookup_raw("ai-analysis/factor/3", ContentKind::Overview)
        .await
        .unwrap();
    assert_eq!(
        via_path.map(|v| v["sections"]["overview"].clone()),
        Some(json!("Legacy row."))
    );
}

/// Store whose reads and writes always fail, for the miss-vs-failure split.
struct BrokenStore;

#[async_trait]
impl ContentStore for BrokenStore {
    async fn select(&self, _key: &ContentKey) -> Result<Option<CacheEntry>> {
        Err(Error::storage("connection refused"))
    }

    async fn upsert(&self, _entry: &CacheEntry) -> Result<()> {
        Err(Error::storage("connection refused"))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

/// Store that reads fine but cannot persist anything.
struct ReadOnlyStore;

#[async_trait]
impl ContentStore for ReadOnlyStore {
    async fn select(&self, _key: &ContentKey) -> Result<Option<CacheEntry>> {
        Ok(None)
    }

    async fn upsert(&self, _entry: &CacheEntry) -> Result<()> {
        Err(Error::storage("disk full"))
    }

    fn name(&self) -> &'static str {
        "read-only"
    }
}

#[tokio::test]
async fn storage_failures_are_never_reported_as_misses() {
    let service = ContentService::new(Arc::new(ContentCache::new(Arc::new(BrokenStore))));

    let err = service.lookup(&key("factor", "3")).await.unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn failed_write_through_propagates_storage_not_generation() {
    let service = ContentService::new(Arc::new(ContentCache::new(Arc::new(ReadOnlyStore))));
    let calls = Arc::new(AtomicUsize::new(0));

    let counted = calls.clone();
    let err = service
        .get_or_generate(&key("factor", "3"), move || async move {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(content("Doomed write."))
        })
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1, "generation did run");
    assert!(matches!(err, Error::Storage(_)));
}

#[tokio::test]
async fn end_to_end_identifier_shapes_resolve_to_one_row() {
    let service = service();

    let generated = service
        .get_or_generate_raw("/observation/2", ContentKind::Overview, || async {
            Ok::<_, String>(content("Observation two."))
        })
        .await
        .unwrap();
    assert_eq!(generated["sections"]["overview"], json!("Observation two."));

    // canonical key holds the row
    let cached = service.cache().get(&key("observation", "2")).await.unwrap();
    assert!(cached.is_some());

    // other historical spellings of the same id hit without generating
    for raw in ["observation-2", "ai-observation-2", "observation%2F2__test"] {
        let hit = service.lookup_raw(raw, ContentKind::Overview).await.unwrap();
        assert!(hit.is_some(), "no hit for {raw}");
    }
}
