//! Axum router wiring.
//!
//! Currently exposes a single `/metrics` route for scrapes.

use axum::{routing::get, Router};

use crate::{app_state::AppState, scrape};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(scrape::metrics))
        .with_state(state)
}
