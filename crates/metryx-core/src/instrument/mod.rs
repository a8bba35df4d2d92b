//! Fluent instrument facades (Counter/Gauge/Histogram/Summary).
//!
//! Facades are short-lived, per-call-site values: they accumulate a name,
//! optional help/unit, labels, and kind-specific configuration, then resolve
//! (or lazily create) their backing state in the registry on the first
//! terminal update. Creation-time configuration only matters for the call
//! that creates the state; later `help`/`buckets`/`quantiles` values on an
//! already-created series are ignored because family and state are fixed at
//! first creation.
//!
//! Terminal updates are infallible on the surface: a kind conflict or
//! rejected configuration logs a `tracing::error!` and drops the update.
//! Call `state()` to get the underlying `Result` instead.

mod counter;
mod gauge;
mod histogram;
mod summary;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::Histogram;
pub use summary::Summary;

use crate::registry::Registry;

impl Registry {
    /// Counter facade: monotonically-intended cumulative metric.
    pub fn counter(&self, name: impl Into<String>) -> Counter<'_> {
        Counter::new(self, name.into())
    }

    /// Gauge facade: value that may move up or down arbitrarily.
    pub fn gauge(&self, name: impl Into<String>) -> Gauge<'_> {
        Gauge::new(self, name.into())
    }

    /// Histogram facade: count, sum, and cumulative per-bucket counts.
    pub fn histogram(&self, name: impl Into<String>) -> Histogram<'_> {
        Histogram::new(self, name.into())
    }

    /// Summary facade: count, sum, and client-side quantile estimates.
    pub fn summary(&self, name: impl Into<String>) -> Summary<'_> {
        Summary::new(self, name.into())
    }
}
