//! Top-level facade crate for metryx.
//!
//! Re-exports the core and the text encoder so users can depend on a single
//! crate, and hosts the process-wide default registry for call sites that do
//! not want to thread a [`Registry`] through. The explicit registry stays
//! the primary API; the free functions here are a convenience wrapper at the
//! boundary only.
//!
//! ```
//! metryx::counter("jobs_done_total")
//!     .help("Jobs completed")
//!     .label("queue", "default")
//!     .inc();
//! let text = metryx::render_text().unwrap();
//! assert!(text.contains("jobs_done_total"));
//! ```

use std::sync::OnceLock;

use metryx_core::instrument::{Counter, Gauge, Histogram, Summary};
use metryx_core::Registry;

pub mod core {
    pub use metryx_core::*;
}

pub mod text {
    pub use metryx_text::*;
}

static DEFAULT: OnceLock<Registry> = OnceLock::new();

/// Process-wide default registry, created on first use.
pub fn default_registry() -> &'static Registry {
    DEFAULT.get_or_init(Registry::new)
}

/// Counter facade against the default registry.
pub fn counter(name: impl Into<String>) -> Counter<'static> {
    default_registry().counter(name)
}

/// Gauge facade against the default registry.
pub fn gauge(name: impl Into<String>) -> Gauge<'static> {
    default_registry().gauge(name)
}

/// Histogram facade against the default registry.
pub fn histogram(name: impl Into<String>) -> Histogram<'static> {
    default_registry().histogram(name)
}

/// Summary facade against the default registry.
pub fn summary(name: impl Into<String>) -> Summary<'static> {
    default_registry().summary(name)
}

/// Order exported family names predictably (lexicographically) instead of
/// first-seen order.
pub fn sort_names(on: bool) {
    default_registry().set_sort_names(on);
}

/// Render the default registry in text exposition format.
pub fn render_text() -> metryx_core::Result<String> {
    metryx_text::render_text(default_registry())
}
