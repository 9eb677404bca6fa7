use chrono::{DateTime, TimeZone, Utc};
use chrono_id::{Generator, Persona, Variant, rand::ThreadRandom, time::TimeSource};
use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::{thread::scope, time::Instant};

struct FixedMockTime {
    now: DateTime<Utc>,
}

impl TimeSource for FixedMockTime {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 5, 20, 10, 30, 0).unwrap()
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Benchmarks a hot-path generator in a single bucket. Sequence wraps and the
/// rotations they trigger are part of the measurement.
fn bench_generator<C: TimeSource>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> Generator<C, ThreadRandom>,
) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{}", TOTAL_IDS), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let mut generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.generate().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks ambient generation from several threads at once. Each thread
/// owns its own state, so this measures scaling rather than contention.
fn bench_ambient_threaded(c: &mut Criterion, group_name: &str, variant: Variant) {
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8] {
        let total_ids = TOTAL_IDS * thread_count;
        group.throughput(Throughput::Elements(total_ids as u64));
        group.bench_function(
            format!("elems/{}/threads/{}", total_ids, thread_count),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();
                    for _ in 0..iters {
                        scope(|s| {
                            for _ in 0..thread_count {
                                s.spawn(|| {
                                    for _ in 0..TOTAL_IDS {
                                        black_box(variant.generate().unwrap());
                                    }
                                });
                            }
                        });
                    }
                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_mock_sequential_chrono64s(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/chrono64s", || {
        let persona = Persona::new(Variant::CHRONO64S.sequence_bits());
        Generator::from_components(
            Variant::CHRONO64S,
            persona,
            FixedMockTime { now: fixed_instant() },
            ThreadRandom,
        )
    });
}

fn benchmark_mock_sequential_chrono32m(c: &mut Criterion) {
    // Two sequence bits: nearly every call rotates the persona.
    bench_generator(c, "mock/sequential/chrono32m", || {
        let persona = Persona::new(Variant::CHRONO32M.sequence_bits());
        Generator::from_components(
            Variant::CHRONO32M,
            persona,
            FixedMockTime { now: fixed_instant() },
            ThreadRandom,
        )
    });
}

fn benchmark_wall_sequential_chrono64ms(c: &mut Criterion) {
    bench_generator(c, "wall/sequential/chrono64ms", || {
        Generator::new(Variant::CHRONO64MS)
    });
}

fn benchmark_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let dt = fixed_instant();
    group.throughput(Throughput::Elements(1));
    group.bench_function("from_parts/chrono64s", |b| {
        b.iter(|| {
            black_box(Variant::CHRONO64S.from_parts(black_box(dt), 5, 7, 3, 0xAB))
        });
    });
    group.bench_function("from_parts/uchrono32bs", |b| {
        b.iter(|| {
            black_box(Variant::UCHRONO32BS.from_parts(black_box(dt), 0, 0, 0, 0))
        });
    });
    group.finish();
}

fn benchmark_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");
    let id = Variant::CHRONO64US.from_raw(0x0184_530C_50F1_03EB);
    group.bench_function("formatted", |b| b.iter(|| black_box(id.formatted())));
    group.bench_function("parse", |b| {
        b.iter(|| {
            black_box(Variant::CHRONO64US.parse(black_box("0184-530C-50F1-03EB")))
        });
    });
    group.bench_function("to_iso_string", |b| {
        b.iter(|| black_box(id.to_iso_string()))
    });
    group.finish();
}

fn benchmark_ambient_threaded(c: &mut Criterion) {
    bench_ambient_threaded(c, "ambient/threaded/chrono64s", Variant::CHRONO64S);
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential_chrono64s,
    benchmark_mock_sequential_chrono32m,
    // Wall clock
    benchmark_wall_sequential_chrono64ms,
    benchmark_ambient_threaded,
    // Building blocks
    benchmark_assemble,
    benchmark_text,
);
criterion_main!(benches);
