//! Summary facade.

use std::sync::Arc;

use crate::label::LabelSet;
use crate::registry::Registry;
use crate::state::{MetricKind, MetricState, MetricValue};
use crate::Result;

/// Per-call-site summary builder.
pub struct Summary<'r> {
    registry: &'r Registry,
    name: String,
    help: Option<String>,
    unit: Option<String>,
    labels: LabelSet,
    quantiles: Vec<f64>,
}

impl<'r> Summary<'r> {
    pub(crate) fn new(registry: &'r Registry, name: String) -> Self {
        Self {
            registry,
            name,
            help: None,
            unit: None,
            labels: LabelSet::new(),
            quantiles: Vec::new(),
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

    /// Target quantiles, strictly ascending, each in `[0, 1]`. Must be
    /// supplied before the first observation that creates the backing state;
    /// later values on an existing series are ignored.
    pub fn quantiles(mut self, targets: &[f64]) -> Self {
        self.quantiles = targets.to_vec();
        self
    }

    /// Resolve (or create) the backing state.
    pub fn state(&self) -> Result<Arc<MetricState>> {
        self.registry.demand(
            &self.name,
            self.help.as_deref(),
            self.unit.as_deref(),
            &self.labels,
            MetricKind::Summary,
            || MetricValue::new_summary(&self.quantiles),
        )
    }

    /// Record one observation: count, sum, sketch insert, then refresh every
    /// target quantile's estimate. Refreshing costs one sketch query per
    /// target, bounded by the sketch's fixed window.
    pub fn observe(self, value: f64) -> Self {
        match self.state() {
            Ok(state) => state.observe_summary(value),
            Err(error) => {
                tracing::error!(metric = %self.name, %error, "summary observation dropped")
            }
        }
        self
    }
}
