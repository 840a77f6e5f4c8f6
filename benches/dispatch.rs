//! Dispatch benchmarks
//!
//! Compares call overhead across storage strategies against a direct call,
//! plus the cost of constructing an owned instance on each allocator.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polyface::{interface, Bump, Global, Inline};

interface! {
    pub interface Accumulate {
        conformance AccumulateImpl;
        table AccumulateTable;

        fn add(&mut self, amount: u64) -> u64;
        fn total(&self) -> u64;
        optional fn clear(&mut self);
    }
}

#[derive(Default)]
struct Sum {
    total: u64,
}

impl AccumulateImpl for Sum {
    #[inline]
    fn add(&mut self, amount: u64) -> u64 {
        self.total = self.total.wrapping_add(amount);
        self.total
    }

    #[inline]
    fn total(&self) -> u64 {
        self.total
    }
}

const CALLS: u64 = 1_000;

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    group.bench_function("direct", |b| {
        let mut sum = Sum::default();
        b.iter(|| {
            for i in 0..CALLS {
                black_box(sum.add(black_box(i)));
            }
        });
    });

    group.bench_function("borrowed", |b| {
        let mut sum = Sum::default();
        let mut acc = Accumulate::borrowed(&mut sum);
        b.iter(|| {
            for i in 0..CALLS {
                black_box(acc.add(black_box(i)));
            }
        });
    });

    group.bench_function("owned", |b| {
        let mut acc = Accumulate::owned(Sum::default()).unwrap();
        b.iter(|| {
            for i in 0..CALLS {
                black_box(acc.add(black_box(i)));
            }
        });
    });

    group.bench_function("inline", |b| {
        let mut acc: Accumulate<Inline<AccumulateTable, 16>> = Accumulate::inline(Sum::default());
        b.iter(|| {
            for i in 0..CALLS {
                black_box(acc.add(black_box(i)));
            }
        });
    });

    group.bench_function("bound", |b| {
        let mut acc = Accumulate::bound(Sum::default());
        b.iter(|| {
            for i in 0..CALLS {
                black_box(acc.add(black_box(i)));
            }
        });
    });

    group.finish();
}

fn bench_optional_miss(c: &mut Criterion) {
    c.bench_function("optional_absent", |b| {
        let mut acc = Accumulate::owned(Sum::default()).unwrap();
        b.iter(|| black_box(acc.clear()));
    });
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct_owned");

    for count in [16usize, 256] {
        group.bench_with_input(BenchmarkId::new("global", count), &count, |b, &count| {
            b.iter(|| {
                let instances: Vec<_> = (0..count)
                    .map(|_| Accumulate::owned_in(Sum::default(), Global).unwrap())
                    .collect();
                black_box(instances.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("bump", count), &count, |b, &count| {
            b.iter(|| {
                let bump = Bump::new();
                let instances: Vec<_> = (0..count)
                    .map(|_| Accumulate::owned_in(Sum::default(), &bump).unwrap())
                    .collect();
                black_box(instances.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_optional_miss, bench_construction);
criterion_main!(benches);
