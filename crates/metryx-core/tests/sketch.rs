//! WindowSketch behavior: empty query, estimate tolerance, concurrency.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use metryx_core::algo::sketch::CAPACITY;
use metryx_core::algo::WindowSketch;

#[test]
fn empty_query_is_none() {
    let sketch = WindowSketch::new();
    assert!(sketch.is_empty());
    assert_eq!(sketch.query(0.5), None);
    assert_eq!(sketch.query(0.0), None);
    assert_eq!(sketch.query(1.0), None);
}

#[test]
fn quantiles_within_tolerance() {
    let sketch = WindowSketch::new();
    for i in 0..1000 {
        sketch.insert(f64::from(i));
    }
    assert_eq!(sketch.len(), 1000);

    let median = sketch.query(0.5).unwrap();
    assert!((median - 499.0).abs() <= 10.0, "median={median}");
    let p90 = sketch.query(0.9).unwrap();
    assert!((p90 - 899.0).abs() <= 20.0, "p90={p90}");
    assert_eq!(sketch.query(0.0), Some(0.0));
    assert_eq!(sketch.query(1.0), Some(999.0));
}

#[test]
fn window_slides_once_full() {
    let sketch = WindowSketch::new();
    for i in 0..(2 * CAPACITY) {
        sketch.insert(i as f64);
    }
    assert_eq!(sketch.len(), CAPACITY);

    // Only the most recent CAPACITY observations remain.
    assert_eq!(sketch.query(0.0), Some(CAPACITY as f64));
    assert_eq!(sketch.query(1.0), Some((2 * CAPACITY - 1) as f64));
}

#[test]
fn query_does_not_disturb_the_window() {
    let sketch = WindowSketch::new();
    // Descending input maximizes partition swapping in the selection.
    for i in (0..CAPACITY).rev() {
        sketch.insert(i as f64);
    }

    let first = sketch.query(0.5);
    for q in [0.1, 0.25, 0.75, 0.99] {
        sketch.query(q);
    }
    assert_eq!(sketch.query(0.5), first);
}

#[test]
fn concurrent_inserts_settle_to_exact_ranks() {
    let sketch = Arc::new(WindowSketch::new());
    let handles: Vec<_> = (0..10)
        .map(|base: usize| {
            let sketch = sketch.clone();
            thread::spawn(move || {
                for j in 0..100 {
                    sketch.insert((base * 100 + j) as f64);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // 1000 distinct values fit inside the window, so ranks are exact once
    // every insert has completed.
    assert_eq!(sketch.len(), 1000);
    assert_eq!(sketch.query(0.5), Some(499.0));
}

#[test]
fn query_racing_inserts_stays_well_formed() {
    let sketch = Arc::new(WindowSketch::new());
    sketch.insert(0.0);

    let writer = {
        let sketch = sketch.clone();
        thread::spawn(move || {
            for i in 1..(5 * CAPACITY) {
                sketch.insert(i as f64);
            }
        })
    };

    // Once one insert has completed, a racing query must never report
    // "no data" and never surface a value outside the inserted range.
    for _ in 0..2_000 {
        let v = sketch.query(0.5).expect("non-empty sketch returned None");
        assert!(!v.is_nan());
        assert!((0.0..(5 * CAPACITY) as f64).contains(&v), "v={v}");
    }
    writer.join().unwrap();
}
