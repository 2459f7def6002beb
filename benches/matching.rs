use std::hint::black_box;
use std::sync::Arc;

use assetmatch::{
    Catalog, DEMO_PROMPTS, EmbeddingProvider, MatchEngine, StubProvider, cosine_similarity,
    match_by_keyword,
};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

fn bench_keyword(c: &mut Criterion) {
    let catalog = Catalog::reference();
    let mut group = c.benchmark_group("keyword");
    group.throughput(Throughput::Elements(DEMO_PROMPTS.len() as u64));
    group.bench_function("demo_prompts", |b| {
        b.iter(|| {
            for prompt in DEMO_PROMPTS {
                black_box(match_by_keyword(black_box(prompt), &catalog));
            }
        })
    });
    group.finish();
}

fn bench_cosine(c: &mut Criterion) {
    let provider = StubProvider::new(384);
    let a = provider.embed("a modern vase with flowers").unwrap();
    let b = provider.embed("a sleek ceramic vase for the living room").unwrap();

    c.bench_function("cosine_384", |bench| {
        bench.iter(|| cosine_similarity(black_box(a.as_slice()), black_box(b.as_slice())))
    });
}

fn bench_engine(c: &mut Criterion) {
    let engine = MatchEngine::new(
        Arc::new(Catalog::reference()),
        Some(Arc::new(StubProvider::new(384))),
    );
    // Warm the catalog embedding cache.
    engine.find_best_match("warm up");

    c.bench_function("engine_stub_semantic", |b| {
        b.iter(|| engine.find_best_match(black_box("a desk lamp for studying")))
    });
}

criterion_group!(benches, bench_keyword, bench_cosine, bench_engine);
criterion_main!(benches);
