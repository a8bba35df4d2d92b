//! metryx core: lock-free metric primitives, the concurrent registry, and
//! instrument facades.
//!
//! This crate holds everything that runs on the hot path: bit-cast atomic
//! `f64` cells, the fixed-capacity quantile window sketch, and the
//! create-once registry that maps (name, labels) identities to long-lived
//! metric state. It intentionally carries no runtime, transport, or encoding
//! dependencies; wire formats and the scrape endpoint live in sibling crates
//! behind the [`registry::FamilyEncoder`] boundary.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as [`Error`]/[`Result`]; instrumentation must
//! never be able to crash the process it is measuring.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod algo;
pub mod error;
pub mod instrument;
pub mod label;
pub mod registry;
pub mod state;

/// Shared result type.
pub use error::{Error, Result};
pub use registry::{FamilyEncoder, MetricFamily, Registry};
