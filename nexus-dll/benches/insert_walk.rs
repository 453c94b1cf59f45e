//! Head insertion and cursor traversal throughput.
//!
//! Run: cargo bench -p nexus-dll --bench insert_walk

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nexus_dll::{DllBuilder, FixedDll, SlabDll};

const SIZES: [usize; 3] = [64, 1_024, 16_384];

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_at_head");

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("slab", size), &size, |b, &size| {
            b.iter(|| {
                let mut list: SlabDll<u64> = DllBuilder::default().capacity(size).build();
                for i in 0..size as u64 {
                    list.insert_at_head(black_box(i));
                }
                list
            });
        });

        group.bench_with_input(BenchmarkId::new("fixed", size), &size, |b, &size| {
            b.iter(|| {
                let mut list: FixedDll<u64> = DllBuilder::default()
                    .fixed()
                    .capacity(size)
                    .build()
                    .unwrap();
                for i in 0..size as u64 {
                    let _ = list.try_insert_at_head(black_box(i));
                }
                list
            });
        });
    }

    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    for size in SIZES {
        let list: SlabDll<u64> = (0..size as u64).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("cursor", size), &list, |b, list| {
            b.iter(|| {
                let mut sum = 0u64;
                let end = list.end();
                let mut cursor = list.begin();
                while cursor != end {
                    sum = sum.wrapping_add(*cursor.get());
                    cursor.advance();
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("iter", size), &list, |b, list| {
            b.iter(|| black_box(list.iter().fold(0u64, |acc, v| acc.wrapping_add(*v))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_walk);
criterion_main!(benches);
