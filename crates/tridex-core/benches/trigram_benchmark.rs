//! Benchmarks for the trigram index: bulk build, query, intersection and
//! pruning.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tridex_core::index::trigram::intersect;
use tridex_core::TrigramIndex;

fn generate_documents(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "Document {} with searchable content about {} and related topics",
                i,
                match i % 5 {
                    0 => "technology",
                    1 => "science",
                    2 => "travel",
                    3 => "cooking",
                    _ => "sports",
                }
            )
        })
        .collect()
}

fn bench_trigram_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigram_build");

    for size in [1_000, 10_000, 100_000] {
        let docs = generate_documents(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &docs, |b, docs| {
            b.iter(|| black_box(TrigramIndex::build(docs)));
        });
    }

    group.finish();
}

fn bench_trigram_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigram_query");

    for size in [10_000, 100_000] {
        let docs = generate_documents(size);
        let index = TrigramIndex::build(&docs);

        group.bench_with_input(BenchmarkId::new("common", size), &index, |b, index| {
            b.iter(|| black_box(index.query("technology")));
        });

        group.bench_with_input(BenchmarkId::new("selective", size), &index, |b, index| {
            b.iter(|| black_box(index.query("Document 4242 ")));
        });

        let mut pruned = index.clone();
        pruned.prune(0.1);
        group.bench_with_input(BenchmarkId::new("pruned", size), &pruned, |b, index| {
            b.iter(|| black_box(index.query("Document 4242 ")));
        });
    }

    group.finish();
}

fn bench_trigram_vs_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigram_vs_linear");

    let docs = generate_documents(10_000);
    let index = TrigramIndex::build(&docs);

    group.bench_function("trigram_candidates_verified", |b| {
        b.iter(|| {
            let hits: Vec<u32> = index
                .query("cooking")
                .into_iter()
                .filter(|&id| docs[id as usize].contains("cooking"))
                .collect();
            black_box(hits)
        });
    });

    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            let hits: Vec<usize> = docs
                .iter()
                .enumerate()
                .filter(|(_, d)| d.contains("cooking"))
                .map(|(i, _)| i)
                .collect();
            black_box(hits)
        });
    });

    group.finish();
}

fn bench_intersect(c: &mut Criterion) {
    let a: Vec<u32> = (0..100_000).step_by(2).collect();
    let b: Vec<u32> = (0..100_000).step_by(3).collect();

    c.bench_function("intersect_50k_33k", |bench| {
        bench.iter(|| black_box(intersect(&a, &b)));
    });
}

criterion_group!(
    benches,
    bench_trigram_build,
    bench_trigram_query,
    bench_trigram_vs_linear,
    bench_intersect
);
criterion_main!(benches);
