use std::net::SocketAddr;

use notification::smtp;

/// Runtime configuration handed to the server once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub web: WebConfig,

    pub metrics: MetricsConfig,

    /// `None` when no SMTP credentials are available; email submissions are
    /// then answered with `503 Service Unavailable`.
    pub mail: Option<smtp::Config>,
}

#[derive(Clone, Debug)]
pub struct WebConfig {
    pub listen_address: SocketAddr,

    /// Origins allowed by CORS. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct MetricsConfig {
    pub enable: bool,

    pub listen_address: SocketAddr,
}
