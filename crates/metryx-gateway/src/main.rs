//! metryx gateway binary.
//!
//! Serves the text exposition of one process-local registry:
//! - Scrape endpoint: GET /metrics
//! - Strict YAML config (metryx.yaml)
//! - tracing via RUST_LOG / EnvFilter

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use metryx_core::Registry;
use metryx_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("metryx.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let registry = Arc::new(Registry::new());
    let state = app_state::AppState::new(cfg, registry);
    let app = router::build_router(state);

    tracing::info!(%listen, "metryx-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
