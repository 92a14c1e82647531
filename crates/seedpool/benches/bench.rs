use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use seedpool::{Seed, SeedStore, SystemClock, ThreadRandom, TimeSource};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    nanos: u64,
}

impl TimeSource for FixedMockTime {
    fn current_nanos(&self) -> u64 {
        self.nanos
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Benchmarks a single seed against a clock, sequentially.
fn bench_seed<T>(c: &mut Criterion, group_name: &str, seed_factory: impl Fn() -> Seed<T>)
where
    T: TimeSource,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let seed = seed_factory();
                for _ in 0..TOTAL_IDS {
                    black_box(seed.next_id());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks threads contending on one seed versus each owning a seed.
fn bench_seed_threaded(c: &mut Criterion, group_name: &str, shared: bool) {
    let mut group = c.benchmark_group(group_name);
    let threads = num_cpus::get();
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let seeds: Vec<_> = (0..threads)
                .map(|_| Arc::new(Seed::try_generate(&ThreadRandom, SystemClock).unwrap()))
                .collect();
            let barrier = Barrier::new(threads + 1);

            let start = scope(|s| {
                for i in 0..threads {
                    let seed = if shared {
                        Arc::clone(&seeds[0])
                    } else {
                        Arc::clone(&seeds[i])
                    };
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        for _ in 0..iters {
                            for _ in 0..TOTAL_IDS {
                                black_box(seed.next_id());
                            }
                        }
                    });
                }
                barrier.wait();
                Instant::now()
            });

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks a borrow/return round-trip against the store lock.
fn bench_store_cycle(c: &mut Criterion) {
    const SEEDS: usize = 1024;
    const BATCH: usize = 16;

    let store = SeedStore::new();
    store.generate_seeds(SEEDS).unwrap();

    let mut group = c.benchmark_group("store/borrow_return");
    group.throughput(Throughput::Elements(BATCH as u64));
    group.bench_function(format!("batch/{BATCH}"), |b| {
        b.iter(|| {
            let seeds = store.borrow_seeds(BATCH);
            black_box(store.return_seeds(seeds));
        });
    });
    group.finish();
}

fn benchmarks(c: &mut Criterion) {
    bench_seed(c, "seed/mock_clock", || {
        Seed::from_bytes([7; 16], FixedMockTime { nanos: 1 })
    });
    bench_seed(c, "seed/system_clock", || {
        Seed::from_bytes([7; 16], SystemClock)
    });
    bench_seed_threaded(c, "seed/threaded_shared", true);
    bench_seed_threaded(c, "seed/threaded_owned", false);
    bench_store_cycle(c);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
