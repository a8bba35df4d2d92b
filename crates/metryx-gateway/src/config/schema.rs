use std::net::SocketAddr;

use serde::Deserialize;

use metryx_core::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::InvalidConfig("version must be 1".into()));
        }
        self.gateway.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Emit families in lexicographic name order instead of first-seen order.
    #[serde(default)]
    pub sort_names: bool,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            sort_names: false,
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            Error::InvalidConfig("gateway.listen must be a valid SocketAddr".into())
        })?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9090".into()
}
