use std::net::{IpAddr, SocketAddr};

use contact_relay_core::{DEFAULT_WEB_HOST, DEFAULT_WEB_PORT};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WebConfig {
    #[serde(default = "WebConfig::default_host")]
    pub host: IpAddr,

    #[serde(default = "WebConfig::default_port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser. Empty allows any.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl WebConfig {
    #[inline]
    #[must_use]
    pub const fn socket_address(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }

    #[inline]
    #[must_use]
    pub const fn default_host() -> IpAddr { DEFAULT_WEB_HOST }

    #[inline]
    #[must_use]
    pub const fn default_port() -> u16 { DEFAULT_WEB_PORT }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self { host: Self::default_host(), port: Self::default_port(), allowed_origins: Vec::new() }
    }
}

impl From<WebConfig> for contact_relay_core::config::WebConfig {
    fn from(config: WebConfig) -> Self {
        Self { listen_address: config.socket_address(), allowed_origins: config.allowed_origins }
    }
}
