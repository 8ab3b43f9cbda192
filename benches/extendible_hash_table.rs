use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use pagecache_core::ExtendibleHashTable;

const KEYS: u64 = 4096;

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("extendible_hash_table");
    group.throughput(Throughput::Elements(KEYS));
    for bucket_size in [4usize, 16, 64] {
        group.bench_function(format!("insert/bucket_{}", bucket_size), |b| {
            b.iter_batched(
                || ExtendibleHashTable::<u64, u64>::new(bucket_size),
                |table| {
                    for k in 0..KEYS {
                        table.insert(std::hint::black_box(k), k);
                    }
                    table
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("extendible_hash_table");
    group.throughput(Throughput::Elements(KEYS));
    group.bench_function("find", |b| {
        let table = ExtendibleHashTable::<u64, u64>::new(16);
        for k in 0..KEYS {
            table.insert(k, k);
        }
        b.iter(|| {
            for k in 0..KEYS {
                std::hint::black_box(table.find(&k));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_find);
criterion_main!(benches);
