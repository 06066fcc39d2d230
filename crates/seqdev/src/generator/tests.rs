use crate::generator::{AtomicSequenceGenerator, BasicSequenceGenerator, SequenceGenerator};
use std::collections::HashSet;
use std::sync::Mutex;
use std::thread::scope;

fn run_first_value_is_start<G>(generator: &G, start: u64)
where
    G: SequenceGenerator,
{
    assert_eq!(generator.next(), start);
}

fn run_values_increment_by_one<G>(generator: &G)
where
    G: SequenceGenerator,
{
    let a = generator.next();
    let b = generator.next();
    let c = generator.next();

    assert_eq!(b, a + 1);
    assert_eq!(c, b + 1);
}

fn run_sequential_values_are_exhaustive<G>(generator: &G)
where
    G: SequenceGenerator,
{
    const TOTAL: u64 = 10_000;

    let issued: Vec<u64> = (0..TOTAL).map(|_| generator.next()).collect();
    assert_eq!(issued, (0..TOTAL).collect::<Vec<_>>());
}

#[test]
fn basic_generator_starts_at_zero() {
    run_first_value_is_start(&BasicSequenceGenerator::new(), 0);
}

#[test]
fn atomic_generator_starts_at_zero() {
    run_first_value_is_start(&AtomicSequenceGenerator::new(), 0);
}

#[test]
fn generators_honor_custom_start() {
    run_first_value_is_start(&BasicSequenceGenerator::starting_at(41), 41);
    run_first_value_is_start(&AtomicSequenceGenerator::starting_at(41), 41);
}

#[test]
fn basic_generator_increments() {
    run_values_increment_by_one(&BasicSequenceGenerator::new());
}

#[test]
fn atomic_generator_increments() {
    run_values_increment_by_one(&AtomicSequenceGenerator::new());
}

#[test]
fn basic_generator_is_exhaustive() {
    run_sequential_values_are_exhaustive(&BasicSequenceGenerator::new());
}

#[test]
fn atomic_generator_is_exhaustive() {
    run_sequential_values_are_exhaustive(&AtomicSequenceGenerator::new());
}

#[test]
fn generator_through_reference() {
    let generator = AtomicSequenceGenerator::new();
    let by_ref = &generator;

    run_values_increment_by_one(&by_ref);
    assert_eq!(generator.next(), 2);
}

#[test]
fn static_generator_is_shared() {
    static COUNTER: AtomicSequenceGenerator = AtomicSequenceGenerator::new();

    let first = COUNTER.next();
    let second = scope(|s| s.spawn(|| COUNTER.next()).join().unwrap());
    assert_eq!(second, first + 1);
}

#[test]
fn atomic_generator_threaded_no_collisions() {
    const IDS_PER_THREAD: usize = 4096 * 16;

    let threads = num_cpus::get().max(2);
    let total = threads * IDS_PER_THREAD;

    let generator = AtomicSequenceGenerator::new();
    let seen = Mutex::new(HashSet::with_capacity(total));

    scope(|s| {
        for _ in 0..threads {
            s.spawn(|| {
                let mut local = Vec::with_capacity(IDS_PER_THREAD);
                for _ in 0..IDS_PER_THREAD {
                    local.push(generator.next());
                }
                let mut seen = seen.lock().unwrap();
                for value in local {
                    assert!(seen.insert(value), "value {value} issued twice");
                }
            });
        }
    });

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), total);
    assert!(seen.iter().all(|&v| v < total as u64));
    assert_eq!(generator.next(), total as u64);
}

#[test]
fn atomic_generator_per_thread_values_increase() {
    const IDS_PER_THREAD: usize = 4096;

    let generator = AtomicSequenceGenerator::new();

    scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut last = None;
                for _ in 0..IDS_PER_THREAD {
                    let value = generator.next();
                    if let Some(prev) = last {
                        assert!(value > prev);
                    }
                    last = Some(value);
                }
            });
        }
    });
}

#[test]
fn basic_generator_wraps_at_max() {
    let generator = BasicSequenceGenerator::starting_at(u64::MAX);
    assert_eq!(generator.next(), u64::MAX);
    assert_eq!(generator.next(), 0);
}
