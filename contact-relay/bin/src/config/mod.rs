mod error;
mod mail;
mod messaging;
mod metrics;
mod web;

use std::{
    io,
    path::{Path, PathBuf},
};

use resolve_path::PathResolveExt;
use relay_cli_common::config::LogConfig;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::{
    error::Error, mail::MailConfig, messaging::MessagingConfig, metrics::MetricsConfig,
    web::WebConfig,
};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub messaging: Option<MessagingConfig>,
}

impl Config {
    #[inline]
    pub fn default_path() -> PathBuf {
        [
            contact_relay_core::PROJECT_CONFIG_DIR.to_path_buf(),
            PathBuf::from(contact_relay_core::CONFIG_NAME),
        ]
        .into_iter()
        .collect()
    }

    /// Search order used when no configuration file is given explicitly.
    pub fn search_paths() -> Vec<PathBuf> {
        std::iter::once(Self::default_path())
            .chain(
                contact_relay_core::fallback_project_config_directories()
                    .into_iter()
                    .map(|dir| dir.join(contact_relay_core::CONFIG_NAME)),
            )
            .collect()
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let data = std::fs::read_to_string(&path)
            .context(error::OpenConfigSnafu { filename: path.as_ref().to_path_buf() })?;

        Self::from_yaml(&data, path.as_ref())
    }

    /// Loads the first configuration file found in [`Config::search_paths`],
    /// or the defaults when there is none.
    pub fn load_or_default() -> Result<Self, Error> {
        for path in Self::search_paths() {
            match std::fs::read_to_string(&path) {
                Ok(data) => return Self::from_yaml(&data, &path),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(Error::OpenConfig { filename: path, source }),
            }
        }

        Ok(Self::default())
    }

    fn from_yaml(data: &str, path: &Path) -> Result<Self, Error> {
        let mut config: Self =
            serde_yaml::from_str(data).context(error::ParseConfigSnafu { filename: path })?;

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        Ok(config)
    }

    /// Overrides mail and messaging settings with environment variables.
    ///
    /// `lookup` returns the value of a variable, `None` when it is unset.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(username) = lookup("MAIL_USER") {
            self.mail.username = username;
        }
        if let Some(app_password) = lookup("MAIL_APP_PASSWORD") {
            self.mail.app_password = app_password;
        }
        if let Some(recipient) = lookup("MAIL_RECIPIENT") {
            self.mail.recipient = Some(recipient);
        }
        if let Some(smtp_host) = lookup("MAIL_SMTP_HOST") {
            self.mail.smtp_host = smtp_host;
        }
        if let Some(value) = lookup("MAIL_SMTP_PORT") {
            self.mail.smtp_port = value
                .trim()
                .parse()
                .context(error::ParseEnvVarSnafu { name: "MAIL_SMTP_PORT", value: value.clone() })?;
        }

        let base_url = lookup("MESSAGING_API_BASE_URL");
        let token = lookup("MESSAGING_API_TOKEN");
        let recipient = lookup("MESSAGING_RECIPIENT");
        if base_url.is_some() || token.is_some() || recipient.is_some() {
            let messaging = self.messaging.get_or_insert_with(MessagingConfig::default);
            if let Some(base_url) = base_url {
                messaging.base_url = base_url;
            }
            if let Some(token) = token {
                messaging.token = token;
            }
            if let Some(recipient) = recipient {
                messaging.recipient = recipient;
            }
        }

        Ok(self)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yaml::to_string(self).context(error::SerializeConfigSnafu)
    }

    /// Runtime configuration handed to the server.
    pub fn into_server_config(self) -> contact_relay_core::config::Config {
        let Self { web, metrics, mail, .. } = self;

        contact_relay_core::config::Config {
            web: web.into(),
            metrics: metrics.into(),
            mail: mail.into_smtp_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        let config = Config::from_yaml(&yaml, Path::new("default.yaml")).unwrap();

        assert_eq!(config.web.port, contact_relay_core::DEFAULT_WEB_PORT);
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert!(config.messaging.is_none());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "web:\n  port: 8080\n  allowed_origins:\n    - https://example.com\nmail:\n  \
                    username: sender@example.com\n";
        let config = Config::from_yaml(yaml, Path::new("partial.yaml")).unwrap();

        assert_eq!(config.web.port, 8080);
        assert_eq!(config.web.host, contact_relay_core::DEFAULT_WEB_HOST);
        assert_eq!(config.web.allowed_origins, vec!["https://example.com".to_string()]);
        assert_eq!(config.mail.username, "sender@example.com");
        assert_eq!(config.mail.smtp_port, 587);
        assert!(config.mail.starttls);
        assert!(!config.metrics.enable);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml("web: [", Path::new("broken.yaml"));

        assert!(matches!(result, Err(Error::ParseConfig { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent-directory/contact-relay.yaml");

        assert!(matches!(result, Err(Error::OpenConfig { .. })));
    }

    #[test]
    fn test_apply_env_configures_mail() {
        let config = Config::default()
            .apply_env(env(&[
                ("MAIL_USER", "sender@example.com"),
                ("MAIL_APP_PASSWORD", "app-password"),
                ("MAIL_SMTP_PORT", "2525"),
            ]))
            .unwrap();

        let smtp = config.into_server_config().mail.unwrap();
        assert_eq!(smtp.username, "sender@example.com");
        assert_eq!(smtp.password, "app-password");
        assert_eq!(smtp.recipient, "sender@example.com");
        assert_eq!(smtp.port, 2525);
        assert_eq!(smtp.host, "smtp.gmail.com");
    }

    #[test]
    fn test_missing_app_password_disables_mail() {
        let config = Config::default()
            .apply_env(env(&[("MAIL_USER", "sender@example.com"), ("MAIL_APP_PASSWORD", " ")]))
            .unwrap();

        assert!(config.into_server_config().mail.is_none());
    }

    #[test]
    fn test_apply_env_recipient_overrides_yaml() {
        let mut config = Config::default();
        config.mail.recipient = Some("yaml@example.com".to_string());

        let config = config.apply_env(env(&[("MAIL_RECIPIENT", "env@example.com")])).unwrap();

        assert_eq!(config.mail.recipient.as_deref(), Some("env@example.com"));
    }

    #[test]
    fn test_apply_env_invalid_port() {
        let result = Config::default().apply_env(env(&[("MAIL_SMTP_PORT", "smtp")]));

        assert!(matches!(
            result,
            Err(Error::ParseEnvVar { name: "MAIL_SMTP_PORT", ref value, .. }) if value == "smtp"
        ));
    }

    #[test]
    fn test_apply_env_configures_messaging() {
        let config = Config::default()
            .apply_env(env(&[
                ("MESSAGING_API_BASE_URL", "https://graph.example.com/v1/123"),
                ("MESSAGING_API_TOKEN", "token"),
                ("MESSAGING_RECIPIENT", "15550199"),
            ]))
            .unwrap();

        let messaging = config.messaging.unwrap().into_client_config().unwrap();
        assert_eq!(messaging.base_url, "https://graph.example.com/v1/123");
        assert_eq!(messaging.timeout.as_secs(), contact_relay_core::DEFAULT_DELIVERY_TIMEOUT_SECS);
    }

    #[test]
    fn test_incomplete_messaging_is_unconfigured() {
        let config =
            Config::default().apply_env(env(&[("MESSAGING_API_TOKEN", "token")])).unwrap();

        assert!(config.messaging.unwrap().into_client_config().is_none());
    }
}
