//! Throughput benchmarks for graph normalization and statement generation
//!
//! Run with: cargo bench --bench normalize_benchmarks

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use graphweave::extraction::ExtractionRecord;
use graphweave::graph::{GraphNormalizer, StatementGenerator, node_id};

/// Alternating entity and relation records, like one engine pass over a scene
fn create_bench_records(count: usize) -> Vec<ExtractionRecord> {
    (0..count)
        .map(|i| {
            if i % 3 == 2 {
                ExtractionRecord::relation(
                    format!("trigger {i}"),
                    (format!("Character {}", i - 1).as_str(), "character"),
                    "addresses",
                    (format!("Character {}", i - 2).as_str(), "character"),
                )
                .with_interval(i as u64 * 10, i as u64 * 10 + 9)
            } else {
                ExtractionRecord::new("character", format!("Character {i}"))
                    .with_attribute("role", "speaker")
                    .with_interval(i as u64 * 10, i as u64 * 10 + 9)
                    .with_index(i as i64)
            }
        })
        .collect()
}

fn bench_node_id(c: &mut Criterion) {
    c.bench_function("node_id", |b| {
        b.iter(|| node_id(black_box("character"), black_box("  Romeo Montague ")))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = GraphNormalizer::new();

    for count in [10, 100, 1000] {
        let records = create_bench_records(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter(|| normalizer.normalize(black_box(records), "bench_doc"))
        });
    }
    group.finish();
}

fn bench_cypher(c: &mut Criterion) {
    let graph = GraphNormalizer::new().normalize(&create_bench_records(1000), "bench_doc");
    let generator = StatementGenerator::new();

    c.bench_function("generate_create_1000", |b| {
        b.iter(|| generator.generate_create(black_box(&graph)))
    });
    c.bench_function("generate_merge_1000", |b| {
        b.iter(|| generator.generate_merge(black_box(&graph)))
    });
}

criterion_group!(benches, bench_node_id, bench_normalize, bench_cypher);
criterion_main!(benches);
