//! Benchmark session acquisition and reading.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use benches::context::Page;
use benches::{page, Templates};
use tessera::{ReadOptions, SessionPool};

criterion_main! { benches }
criterion_group! { benches, bench_acquire, bench_read }

/// Benchmarks the time taken to build a session tree.
fn bench_acquire(c: &mut Criterion) {
    let mut g = c.benchmark_group("acquire");

    let templates = Templates::new();
    let ctx = Page::random(150);
    let options = ReadOptions::new().deep(true).deep_collections(true);

    let pools = [
        ("pooled", SessionPool::new()),
        ("fresh", SessionPool::disabled()),
    ];
    for (name, pool) in pools {
        g.bench_function(name, |b| {
            b.iter(|| {
                let session = page(&pool, &templates, &ctx);
                session.read_with(options).unwrap()
            });
        });
    }
}

/// Benchmarks the time taken to read a session tree.
fn bench_read(c: &mut Criterion) {
    let mut g = c.benchmark_group("read");

    let templates = Templates::new();
    let ctx = Page::random(150);
    let pool = SessionPool::new();

    let shallow = ReadOptions::new();
    let deep = ReadOptions::new().deep(true).deep_collections(true);

    for (name, options) in [("shallow", shallow), ("deep", deep)] {
        g.bench_function(name, |b| {
            b.iter_batched(
                || page(&pool, &templates, &ctx),
                |session| session.read_with(options).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}
