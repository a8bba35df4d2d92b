//! Instrument facade end-to-end scenarios.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use metryx_core::state::MetricValue;
use metryx_core::Registry;

#[test]
fn histogram_cumulative_semantics() {
    let registry = Registry::new();
    registry
        .histogram("size_bytes")
        .buckets(&[1.0, 5.0, 10.0])
        .observe(3.0);

    let state = registry
        .histogram("size_bytes")
        .buckets(&[1.0, 5.0, 10.0])
        .state()
        .unwrap();
    let MetricValue::Histogram {
        count,
        sum,
        buckets,
    } = state.value()
    else {
        panic!("expected histogram state");
    };

    assert_eq!(count.load(Ordering::Relaxed), 1);
    assert_eq!(sum.load(), 3.0);
    // v=3 lands in every bucket with bound >= 3, not just the tightest one.
    let cumulative: Vec<u64> = buckets.iter().map(|b| b.cumulative()).collect();
    assert_eq!(cumulative, [0, 1, 1]);

    registry.histogram("size_bytes").observe(0.5);
    let cumulative: Vec<u64> = buckets.iter().map(|b| b.cumulative()).collect();
    assert_eq!(cumulative, [1, 2, 2]);
    assert_eq!(count.load(Ordering::Relaxed), 2);
    assert_eq!(sum.load(), 3.5);
}

#[test]
fn counter_end_to_end_across_threads() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 250;

    let registry = Arc::new(Registry::new());
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    registry
                        .counter("requests_total")
                        .help("requests served")
                        .label("method", "GET")
                        .add(1.0);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let get = registry
        .counter("requests_total")
        .label("method", "GET")
        .state()
        .unwrap();
    assert_eq!(get.as_counter().unwrap().load(), 1_000.0);

    // A later label combination is an independent series starting at zero.
    let post = registry
        .counter("requests_total")
        .label("method", "POST")
        .state()
        .unwrap();
    assert_eq!(post.as_counter().unwrap().load(), 0.0);
    assert!(!Arc::ptr_eq(&get, &post));
}

#[test]
fn counter_set_overwrites_accumulated_total() {
    let registry = Registry::new();
    registry.counter("restored_total").add(7.0);

    // Restoring a checkpointed total replaces whatever accumulated.
    registry.counter("restored_total").set(3.0);
    registry.counter("restored_total").inc();

    let state = registry.counter("restored_total").state().unwrap();
    assert_eq!(state.as_counter().unwrap().load(), 4.0);
}

#[test]
fn gauge_moves_both_ways() {
    let registry = Registry::new();
    registry.gauge("queue_depth").set(10.0);
    registry.gauge("queue_depth").add(2.5);
    registry.gauge("queue_depth").dec();
    registry.gauge("queue_depth").inc();

    let state = registry.gauge("queue_depth").state().unwrap();
    assert_eq!(state.as_gauge().unwrap().load(), 12.5);
}

#[test]
fn summary_end_to_end_across_threads() {
    let registry = Arc::new(Registry::new());
    let handles: Vec<_> = (1..=10)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                registry
                    .summary("latency_ms")
                    .quantiles(&[0.5, 0.9, 0.99])
                    .observe((i * 10) as f64);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let state = registry
        .summary("latency_ms")
        .quantiles(&[0.5, 0.9, 0.99])
        .state()
        .unwrap();
    let MetricValue::Summary {
        count,
        sum,
        quantiles,
        ..
    } = state.value()
    else {
        panic!("expected summary state");
    };

    assert_eq!(count.load(Ordering::Relaxed), 10);
    assert_eq!(sum.load(), 550.0);

    // Estimate cells are refreshed independently per observation, so allow
    // one rank of slack for a straggling writer.
    for (target, expected) in [(0.5, 50.0), (0.9, 90.0), (0.99, 100.0)] {
        let cell = quantiles
            .iter()
            .find(|c| c.target() == target)
            .expect("configured target missing");
        let estimate = cell.estimate();
        assert!(
            (estimate - expected).abs() <= 10.0,
            "q{target}: estimate={estimate} expected~{expected}"
        );
    }
}

#[test]
fn conflicting_kind_update_is_dropped_quietly() {
    let registry = Registry::new();
    registry.counter("mixed").inc();

    // Wrong-kind update must not panic, must not corrupt the counter.
    registry.gauge("mixed").set(42.0);

    let state = registry.counter("mixed").state().unwrap();
    assert_eq!(state.as_counter().unwrap().load(), 1.0);
}
