use std::time::Duration;

use contact_relay_core::DEFAULT_DELIVERY_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize)]
pub struct MessagingConfig {
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub recipient: String,

    #[serde(default = "MessagingConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MessagingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("recipient", &self.recipient)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MessagingConfig {
    #[inline]
    #[must_use]
    pub const fn default_timeout_secs() -> u64 { DEFAULT_DELIVERY_TIMEOUT_SECS }

    /// Messaging client configuration, or `None` when a field is missing.
    #[must_use]
    pub fn into_client_config(self) -> Option<notification::messaging::Config> {
        let Self { base_url, token, recipient, timeout_secs } = self;
        if base_url.is_empty() || token.is_empty() || recipient.is_empty() {
            return None;
        }

        Some(notification::messaging::Config {
            base_url,
            token,
            recipient,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            recipient: String::new(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}
