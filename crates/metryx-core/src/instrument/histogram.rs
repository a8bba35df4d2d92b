//! Histogram facade.

use std::sync::Arc;

use crate::label::LabelSet;
use crate::registry::Registry;
use crate::state::{MetricKind, MetricState, MetricValue};
use crate::Result;

/// Per-call-site histogram builder.
pub struct Histogram<'r> {
    registry: &'r Registry,
    name: String,
    help: Option<String>,
    unit: Option<String>,
    labels: LabelSet,
    buckets: Vec<f64>,
}

impl<'r> Histogram<'r> {
    pub(crate) fn new(registry: &'r Registry, name: String) -> Self {
        Self {
            registry,
            name,
            help: None,
            unit: None,
            labels: LabelSet::new(),
            buckets: Vec::new(),
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(name, value);
        self
    }

    /// Upper bounds, strictly ascending. Must be supplied before the first
    /// observation that creates the backing state; later values on an
    /// existing series are ignored.
    pub fn buckets(mut self, bounds: &[f64]) -> Self {
        self.buckets = bounds.to_vec();
        self
    }

    /// Resolve (or create) the backing state.
    pub fn state(&self) -> Result<Arc<MetricState>> {
        self.registry.demand(
            &self.name,
            self.help.as_deref(),
            self.unit.as_deref(),
            &self.labels,
            MetricKind::Histogram,
            || MetricValue::new_histogram(&self.buckets),
        )
    }

    /// Record one observation: total count, sum, and every bucket with an
    /// upper bound >= `value` (cumulative semantics).
    pub fn observe(self, value: f64) -> Self {
        match self.state() {
            Ok(state) => state.observe_histogram(value),
            Err(error) => {
                tracing::error!(metric = %self.name, %error, "histogram observation dropped")
            }
        }
        self
    }
}
