//! Per-series metric state.
//!
//! A [`MetricState`] is the atomically-updatable payload behind one
//! (name, labels) identity. It is created exactly once by the registry and
//! lives for the process lifetime; after publication every update goes
//! straight to its atomic cells without any lock.
//!
//! Readers get no cross-cell atomicity: a histogram's count can be observed
//! ahead of its sum, and summary quantile cells are overwritten
//! independently. Exporters must tolerate momentarily inconsistent
//! snapshots.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::algo::{self, AtomicF64, WindowSketch};
use crate::error::{Error, Result};
use crate::label::LabelSet;

/// Metric kind, fixed per family at first creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
    Summary,
}

impl MetricKind {
    /// Name used in the text exposition `# TYPE` line.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
            MetricKind::Summary => "summary",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One histogram bucket: upper bound plus the cumulative count of
/// observations less than or equal to it.
#[derive(Debug)]
pub struct Bucket {
    upper_bound: f64,
    cumulative: AtomicU64,
}

impl Bucket {
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn cumulative(&self) -> u64 {
        self.cumulative.load(Ordering::Relaxed)
    }
}

/// One summary target quantile and its latest estimate.
///
/// The estimate starts at NaN and is overwritten on every observation, so a
/// reader may see one cell fresher than another.
#[derive(Debug)]
pub struct QuantileCell {
    target: f64,
    estimate: AtomicF64,
}

impl QuantileCell {
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Latest estimate; NaN until the first observation.
    pub fn estimate(&self) -> f64 {
        self.estimate.load()
    }
}

/// Kind-specific atomic payload.
#[derive(Debug)]
pub enum MetricValue {
    Counter {
        value: AtomicF64,
    },
    Gauge {
        value: AtomicF64,
    },
    Histogram {
        count: AtomicU64,
        sum: AtomicF64,
        buckets: Vec<Bucket>,
    },
    Summary {
        count: AtomicU64,
        sum: AtomicF64,
        quantiles: Vec<QuantileCell>,
        sketch: WindowSketch,
    },
}

impl MetricValue {
    pub fn new_counter() -> Self {
        MetricValue::Counter {
            value: AtomicF64::new(0.0),
        }
    }

    pub fn new_gauge() -> Self {
        MetricValue::Gauge {
            value: AtomicF64::new(0.0),
        }
    }

    /// Bounds must be strictly ascending. An empty list is allowed and
    /// yields a count/sum-only histogram.
    pub fn new_histogram(bounds: &[f64]) -> Result<Self> {
        ensure_ascending("histogram buckets", bounds)?;
        Ok(MetricValue::Histogram {
            count: AtomicU64::new(0),
            sum: AtomicF64::new(0.0),
            buckets: bounds
                .iter()
                .map(|&upper_bound| Bucket {
                    upper_bound,
                    cumulative: AtomicU64::new(0),
                })
                .collect(),
        })
    }

    /// Targets must be strictly ascending and within `[0, 1]`.
    pub fn new_summary(targets: &[f64]) -> Result<Self> {
        ensure_ascending("summary quantiles", targets)?;
        if targets.iter().any(|&q| !(0.0..=1.0).contains(&q)) {
            return Err(Error::InvalidConfig(
                "summary quantiles must lie in [0, 1]".into(),
            ));
        }
        Ok(MetricValue::Summary {
            count: AtomicU64::new(0),
            sum: AtomicF64::new(0.0),
            quantiles: targets
                .iter()
                .map(|&target| QuantileCell {
                    target,
                    estimate: AtomicF64::new(f64::NAN),
                })
                .collect(),
            sketch: WindowSketch::new(),
        })
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Counter { .. } => MetricKind::Counter,
            MetricValue::Gauge { .. } => MetricKind::Gauge,
            MetricValue::Histogram { .. } => MetricKind::Histogram,
            MetricValue::Summary { .. } => MetricKind::Summary,
        }
    }
}

fn ensure_ascending(what: &str, values: &[f64]) -> Result<()> {
    if values.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::InvalidConfig(format!(
            "{what} must be strictly ascending"
        )));
    }
    Ok(())
}

/// One (name, labels) series: label set, creation timestamp, and the
/// kind-specific atomic payload. Shared by every caller that resolves the
/// same identity.
#[derive(Debug)]
pub struct MetricState {
    labels: LabelSet,
    created_ms: u64,
    value: MetricValue,
}

impl MetricState {
    pub(crate) fn new(labels: LabelSet, value: MetricValue) -> Self {
        Self {
            labels,
            created_ms: algo::timestamp_ms(),
            value,
        }
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Creation time, milliseconds since the Unix epoch.
    pub fn created_ms(&self) -> u64 {
        self.created_ms
    }

    pub fn kind(&self) -> MetricKind {
        self.value.kind()
    }

    pub fn value(&self) -> &MetricValue {
        &self.value
    }

    /// The counter's value cell, if this series is a counter.
    pub fn as_counter(&self) -> Option<&AtomicF64> {
        match &self.value {
            MetricValue::Counter { value } => Some(value),
            _ => None,
        }
    }

    /// The gauge's value cell, if this series is a gauge.
    pub fn as_gauge(&self) -> Option<&AtomicF64> {
        match &self.value {
            MetricValue::Gauge { value } => Some(value),
            _ => None,
        }
    }

    /// Record `v`: bump count, add to sum, and bump every bucket whose upper
    /// bound is >= `v` (cumulative "less-or-equal" semantics). No-op on a
    /// non-histogram series; `Registry::demand` makes that unreachable.
    pub(crate) fn observe_histogram(&self, v: f64) {
        if let MetricValue::Histogram {
            count,
            sum,
            buckets,
        } = &self.value
        {
            count.fetch_add(1, Ordering::Relaxed);
            sum.fetch_add(v);
            for bucket in buckets {
                if v <= bucket.upper_bound {
                    bucket.cumulative.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    /// Record `v`: bump count, add to sum, insert into the sketch, then
    /// refresh every target quantile's estimate from the sketch. Estimates
    /// are only as fresh as the last observation on any thread.
    pub(crate) fn observe_summary(&self, v: f64) {
        if let MetricValue::Summary {
            count,
            sum,
            quantiles,
            sketch,
        } = &self.value
        {
            count.fetch_add(1, Ordering::Relaxed);
            sum.fetch_add(v);
            sketch.insert(v);
            for cell in quantiles {
                if let Some(estimate) = sketch.query(cell.target) {
                    cell.estimate.store(estimate);
                }
            }
        }
    }
}
