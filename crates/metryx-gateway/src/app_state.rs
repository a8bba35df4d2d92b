//! Shared application state for the scrape endpoint.

use std::sync::Arc;

use metryx_core::Registry;

use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Arc<Registry>,
    cfg: GatewayConfig,
}

impl AppState {
    /// Bind a registry to this gateway. The sort-names option from the
    /// config is applied to the registry here, once.
    pub fn new(cfg: GatewayConfig, registry: Arc<Registry>) -> Self {
        registry.set_sort_names(cfg.gateway.sort_names);
        Self {
            inner: Arc::new(Inner { registry, cfg }),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.cfg
    }
}
