//! Default-registry facade tests.
//!
//! The default registry is process-global, so each test uses its own metric
//! names.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::thread;

#[test]
fn counters_through_the_global_facade() {
    const ITER: usize = 200;

    let handles: Vec<_> = (0..4)
        .map(|t| {
            thread::spawn(move || {
                for _ in 0..ITER {
                    metryx::counter("g_ctr_total")
                        .help("facade counter")
                        .label("l1", if t % 2 == 0 { "v1" } else { "v2" })
                        .inc();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let out = metryx::render_text().unwrap();
    assert!(out.contains("# TYPE g_ctr_total counter"));
    assert!(out.contains("g_ctr_total{l1=\"v1\"} 400"));
    assert!(out.contains("g_ctr_total{l1=\"v2\"} 400"));
}

#[test]
fn histograms_through_the_global_facade() {
    for i in 0..10 {
        metryx::histogram("g_hist_seconds")
            .buckets(&[0.1, 1.0, 10.0])
            .label("l1", "v1")
            .observe(0.1 * f64::from(i));
    }

    let out = metryx::render_text().unwrap();
    assert!(out.contains("# TYPE g_hist_seconds histogram"));
    assert!(out.contains("g_hist_seconds_count{l1=\"v1\"} 10"));
}
