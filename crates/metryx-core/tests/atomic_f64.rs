//! AtomicF64 contract tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use metryx_core::algo::AtomicF64;

#[test]
fn add_is_exact_under_contention() {
    const THREADS: usize = 16;
    const PER_THREAD: usize = 5_000;

    let cell = Arc::new(AtomicF64::new(0.0));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cell = cell.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    cell.fetch_add(1.0);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // No lost updates: integer-valued f64 addition is exact in this range.
    assert_eq!(cell.load(), (THREADS * PER_THREAD) as f64);
}

#[test]
fn store_load_preserves_bits() {
    let cell = AtomicF64::new(0.0);
    for v in [
        0.0,
        -0.0,
        1.5,
        -273.15,
        f64::MIN_POSITIVE,
        f64::MAX,
        f64::INFINITY,
        f64::NEG_INFINITY,
    ] {
        cell.store(v);
        assert_eq!(cell.load().to_bits(), v.to_bits());
    }

    cell.store(f64::NAN);
    assert!(cell.load().is_nan());
}

#[test]
fn fetch_add_returns_previous() {
    let cell = AtomicF64::new(2.0);
    assert_eq!(cell.fetch_add(3.0), 2.0);
    assert_eq!(cell.load(), 5.0);
    assert_eq!(cell.fetch_add(-5.0), 5.0);
    assert_eq!(cell.load(), 0.0);
}
