use std::time::Duration;

use contact_relay_core::{DEFAULT_DELIVERY_TIMEOUT_SECS, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    #[serde(default = "MailConfig::default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "MailConfig::default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default = "MailConfig::default_starttls")]
    pub starttls: bool,

    /// SMTP account, also used as the sender address.
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub app_password: String,

    #[serde(default)]
    pub sender_name: Option<String>,

    /// Fixed recipient of contact emails, defaults to `username`.
    #[serde(default)]
    pub recipient: Option<String>,

    #[serde(default = "MailConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("starttls", &self.starttls)
            .field("username", &self.username)
            .field("app_password", &"<redacted>")
            .field("sender_name", &self.sender_name)
            .field("recipient", &self.recipient)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MailConfig {
    #[inline]
    #[must_use]
    pub fn default_smtp_host() -> String { DEFAULT_SMTP_HOST.to_string() }

    #[inline]
    #[must_use]
    pub const fn default_smtp_port() -> u16 { DEFAULT_SMTP_PORT }

    #[inline]
    #[must_use]
    pub const fn default_starttls() -> bool { true }

    #[inline]
    #[must_use]
    pub const fn default_timeout_secs() -> u64 { DEFAULT_DELIVERY_TIMEOUT_SECS }

    /// SMTP client configuration, or `None` when credentials are incomplete.
    #[must_use]
    pub fn into_smtp_config(self) -> Option<notification::smtp::Config> {
        let Self {
            smtp_host,
            smtp_port,
            starttls,
            username,
            app_password,
            sender_name,
            recipient,
            timeout_secs,
        } = self;

        if username.is_empty() {
            tracing::warn!("MAIL_USER is not set, email delivery is disabled");
            return None;
        }
        if app_password.is_empty() {
            tracing::warn!("MAIL_APP_PASSWORD is not set, email delivery is disabled");
            return None;
        }

        Some(notification::smtp::Config {
            host: smtp_host,
            port: smtp_port,
            starttls,
            recipient: recipient.unwrap_or_else(|| username.clone()),
            username,
            password: app_password,
            sender_name,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: Self::default_smtp_host(),
            smtp_port: Self::default_smtp_port(),
            starttls: Self::default_starttls(),
            username: String::new(),
            app_password: String::new(),
            sender_name: None,
            recipient: None,
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}
