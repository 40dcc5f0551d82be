//! Benchmarks for the identifier resolution hot path
//!
//! This benchmark measures:
//! - Raw id parsing across the historical shape zoo
//! - Variant-list generation for cache probing
//! - The combined parse-then-variants path a lookup performs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ai_content_cache::resolver::{parse_recommendation_id, variant_candidates};

/// One raw id per historical naming scheme.
const RAW_IDS: &[(&str, &str)] = &[
    ("namespaced", "ai-analysis/factor/3"),
    ("url_encoded", "ai-analysis%2Ffactor%2F3"),
    ("plain_path", "/observation/2"),
    ("ai_prefixed", "ai-glow-boost-2"),
    ("canonical", "timeline-1"),
    ("bare_marker", "ai"),
    ("route_modifier", "timeline-2__test"),
    ("malformed", "///"),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_recommendation_id");
    for (name, raw) in RAW_IDS {
        group.bench_with_input(BenchmarkId::from_parameter(name), raw, |b, raw| {
            b.iter(|| parse_recommendation_id(black_box(raw)));
        });
    }
    group.finish();
}

fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("variant_candidates");
    group.bench_function("canonical_pair", |b| {
        b.iter(|| variant_candidates(black_box("factor"), black_box("3"), black_box("factor-3")));
    });
    group.bench_function("prefixed_pair", |b| {
        b.iter(|| {
            variant_candidates(
                black_box("ai-factor"),
                black_box("3"),
                black_box("ai-factor-3"),
            )
        });
    });
    group.finish();
}

fn bench_full_resolution(c: &mut Criterion) {
    c.bench_function("parse_then_variants", |b| {
        b.iter(|| {
            for (_, raw) in RAW_IDS {
                let parsed = parse_recommendation_id(black_box(raw));
                black_box(parsed.variants(raw));
            }
        });
    });
}

criterion_group!(benches, bench_parse, bench_variants, bench_full_resolution);
criterion_main!(benches);
