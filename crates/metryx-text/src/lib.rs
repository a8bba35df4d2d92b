//! Prometheus text exposition encoding for metryx registries.
//!
//! This crate is the wire-format collaborator behind the core's
//! [`FamilyEncoder`] boundary: the core hands it families in a stable order
//! and it turns them into scrape-ready text. Output is byte-stable given a
//! stable family order; reads never mutate metric state.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

mod encoder;

pub use encoder::TextEncoder;

use bytes::Bytes;

use metryx_core::{Registry, Result};

/// Render every family of `registry` in text exposition format.
pub fn render_text(registry: &Registry) -> Result<String> {
    let mut encoder = TextEncoder::new();
    registry.encode(&mut encoder)?;
    Ok(encoder.into_string())
}

/// [`render_text`], as bytes ready to hand to a transport.
pub fn render_bytes(registry: &Registry) -> Result<Bytes> {
    render_text(registry).map(Bytes::from)
}
