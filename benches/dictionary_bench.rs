use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hashdict::utils::random_generator::KeyRng;
use hashdict::{Dictionary, Strategy};

const SIZES: [usize; 4] = [1_000, 10_000, 50_000, 90_000];

/// Keys drawn from `[1, 10 * count]`, the distribution the comparison runs use.
fn generate_keys(count: usize, seed: u64) -> Vec<i32> {
    KeyRng::new(seed).keys(count, 1, count as i32 * 10)
}

fn populated(strategy: Strategy, keys: &[i32]) -> Box<dyn Dictionary> {
    let mut table = strategy.with_capacity(keys.len());
    for &key in keys {
        table.insert(key, 0).expect("insert");
    }
    table
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in SIZES {
        let keys = generate_keys(size, size as u64);
        for strategy in Strategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.to_string(), size), &keys, |b, keys| {
                b.iter(|| {
                    let mut table = strategy.with_capacity(keys.len());
                    for &key in keys {
                        let _ = black_box(table.insert(key, 0));
                    }
                    table
                });
            });
        }
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for size in SIZES {
        let keys = generate_keys(size, size as u64);
        let probes = generate_keys(size, size as u64 + 1);
        for strategy in Strategy::ALL {
            let table = populated(strategy, &keys);
            group.bench_with_input(BenchmarkId::new(strategy.to_string(), size), &probes, |b, probes| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for &key in probes {
                        hits += table.find(black_box(key)).is_some() as usize;
                    }
                    hits
                });
            });
        }
    }
    group.finish();
}

fn bench_remove_half(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_half");

    for size in SIZES {
        let keys = generate_keys(size, size as u64);
        let mut doomed = keys.clone();
        KeyRng::new(size as u64 ^ 0xdead).shuffle(&mut doomed);
        doomed.truncate(size / 2);

        for strategy in Strategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.to_string(), size), &doomed, |b, doomed| {
                b.iter_batched(
                    || populated(strategy, &keys),
                    |mut table| {
                        for &key in doomed {
                            black_box(table.remove(key));
                        }
                        table
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_find, bench_remove_half);
criterion_main!(benches);
