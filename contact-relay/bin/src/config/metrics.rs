use std::net::{IpAddr, SocketAddr};

use contact_relay_core::{DEFAULT_METRICS_HOST, DEFAULT_METRICS_PORT};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "MetricsConfig::default_enable")]
    pub enable: bool,

    #[serde(default = "MetricsConfig::default_host")]
    pub host: IpAddr,

    #[serde(default = "MetricsConfig::default_port")]
    pub port: u16,
}

impl MetricsConfig {
    #[inline]
    #[must_use]
    pub const fn socket_address(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }

    #[inline]
    #[must_use]
    pub const fn default_enable() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_host() -> IpAddr { DEFAULT_METRICS_HOST }

    #[inline]
    #[must_use]
    pub const fn default_port() -> u16 { DEFAULT_METRICS_PORT }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enable: Self::default_enable(),
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl From<MetricsConfig> for contact_relay_core::config::MetricsConfig {
    fn from(config: MetricsConfig) -> Self {
        Self { enable: config.enable, listen_address: config.socket_address() }
    }
}
