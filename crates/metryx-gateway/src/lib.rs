//! metryx gateway library entry.
//!
//! This crate wires a registry, the text encoder, and an HTTP scrape
//! endpoint into a runnable exporter process. It is intended to be consumed
//! by the binary (`main.rs`) and by integration tests; the instrumentation
//! core stays free of all of this.

pub mod app_state;
pub mod config;
pub mod router;
pub mod scrape;
