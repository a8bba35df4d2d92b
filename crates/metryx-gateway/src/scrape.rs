//! `/metrics` scrape handler.

use std::time::Instant;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::app_state::AppState;

/// Prometheus text exposition content type.
const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn metrics(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let registry = state.registry();

    registry
        .counter("metryx_scrapes_total")
        .help("Scrapes served by the gateway")
        .inc();

    match metryx_text::render_text(registry) {
        Ok(body) => {
            registry
                .summary("metryx_render_seconds")
                .help("Text rendition latency")
                .unit("seconds")
                .quantiles(&[0.5, 0.9, 0.99])
                .observe(started.elapsed().as_secs_f64());
            ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
        }
        Err(error) => {
            tracing::error!(%error, "metrics render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
        }
    }
}
