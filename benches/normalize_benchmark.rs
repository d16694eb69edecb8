//! Benchmarks for ungremlin normalization performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the full pipeline over synthetic dirty documents at
//! various sizes, plus each pass in isolation on a fixed document.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Creates a synthetic dirty document with the given number of paragraphs.
fn create_dirty_document(paragraph_count: usize) -> String {
    let mut text = String::new();

    for i in 0..paragraph_count {
        text.push_str(&format!(
            "## Section {i}\u{200B}\n\
             The caf\u{00e9}\u{2014}menu lists **croissants**\u{00a0}and\u{2026} more.\n\
             Totals: 3\u{2062}4 and 1\u{2063}000\u{2064}5 \u{201C}as shown\u{201D}.\n\
             Broken bytes: cafÃ© naÃ¯ve rÃ©sumÃ©.\n\n\n\n"
        ));
    }

    text
}

/// Benchmark the full pipeline at various document sizes.
fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for para_count in [10, 100, 500, 1000].iter() {
        let text = create_dirty_document(*para_count);
        let size = text.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(
            BenchmarkId::new("paragraphs", para_count),
            &text,
            |b, text| {
                b.iter(|| ungremlin::normalize(black_box(text)));
            },
        );
    }

    group.finish();
}

/// Benchmark each pass in isolation.
fn bench_individual_passes(c: &mut Criterion) {
    let text = create_dirty_document(100);
    let rules = ungremlin::RuleSet::builtin();

    c.bench_function("repair", |b| {
        b.iter(|| ungremlin::repair::repair(black_box(&text)));
    });

    c.bench_function("substitute", |b| {
        b.iter(|| ungremlin::rules::substitute(black_box(&text), rules));
    });

    c.bench_function("strip_artifacts", |b| {
        b.iter(|| ungremlin::artifacts::strip_artifacts(black_box(&text), rules));
    });

    c.bench_function("normalize_whitespace", |b| {
        b.iter(|| ungremlin::whitespace::normalize_whitespace(black_box(&text)));
    });
}

/// Benchmark clean input (the no-op path).
fn bench_clean_input(c: &mut Criterion) {
    let text = "Plain ASCII text with nothing to fix.\n".repeat(200);

    c.bench_function("normalize_clean_input", |b| {
        b.iter(|| ungremlin::normalize(black_box(&text)));
    });
}

criterion_group!(
    benches,
    bench_full_pipeline,
    bench_individual_passes,
    bench_clean_input,
);
criterion_main!(benches);
