//! Counter facade.

use std::sync::Arc;

use crate::label::LabelSet;
use crate::registry::Registry;
use crate::state::{MetricKind, MetricState, MetricValue};
use crate::Result;

/// Per-call-site counter builder. Counters are expected to only ever grow.
pub struct Counter<'r> {
    registry: &'r Registry,
    name: String,
    help: Option<String>,
    unit: Option<String>,
    labels: LabelSet,
}

impl<'r> Counter<'r> {
    pub(crate) fn new(registry: &'r Registry, name: String) -> Self {
        Self {
            registry,
            name,
            help: None,
            unit: None,
            labels: LabelSet::new(),
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

    /// Resolve (or create) the backing state.
    pub fn state(&self) -> Result<Arc<MetricState>> {
        self.registry.demand(
            &self.name,
            self.help.as_deref(),
            self.unit.as_deref(),
            &self.labels,
            MetricKind::Counter,
            || Ok(MetricValue::new_counter()),
        )
    }

    /// Add `delta`. Deltas are conventionally >= 0; negative deltas are not
    /// rejected but will confuse rate queries downstream.
    pub fn add(self, delta: f64) -> Self {
        match self.state() {
            Ok(state) => {
                if let Some(cell) = state.as_counter() {
                    cell.fetch_add(delta);
                }
            }
            Err(error) => tracing::error!(metric = %self.name, %error, "counter update dropped"),
        }
        self
    }

    /// Add 1.
    pub fn inc(self) -> Self {
        self.add(1.0)
    }

    /// Overwrite the value. Escape hatch for counters restored from a
    /// checkpoint; do not use it to move a live counter backwards.
    pub fn set(self, value: f64) -> Self {
        match self.state() {
            Ok(state) => {
                if let Some(cell) = state.as_counter() {
                    cell.store(value);
                }
            }
            Err(error) => tracing::error!(metric = %self.name, %error, "counter update dropped"),
        }
        self
    }
}
