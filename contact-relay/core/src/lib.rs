pub mod config;
pub mod error;
pub mod model;

use std::{
    net::{IpAddr, Ipv4Addr},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PROJECT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PROJECT_NAME: &str = "contact-relay";

pub const PROGRAM_NAME: &str = "contact-relay";
pub const CONFIG_NAME: &str = "contact-relay.yaml";

pub const DEFAULT_WEB_PORT: u16 = 5000;
pub const DEFAULT_WEB_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

pub const DEFAULT_METRICS_PORT: u16 = 5001;
pub const DEFAULT_METRICS_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 30;

pub static PROJECT_CONFIG_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    ProjectDirs::from("", PROJECT_NAME, PROJECT_NAME)
        .map_or_else(|| PathBuf::from("."), |dirs| dirs.config_dir().to_path_buf())
});

/// Directories searched for the configuration file when the platform
/// configuration directory has none.
#[must_use]
pub fn fallback_project_config_directories() -> Vec<PathBuf> {
    let Some(user_dirs) = directories::UserDirs::new() else {
        return vec![Path::new("/etc").join(PROJECT_NAME)];
    };
    vec![
        user_dirs.home_dir().join(".config").join(PROJECT_NAME),
        user_dirs.home_dir().join(format!(".{PROJECT_NAME}")),
        Path::new("/etc").join(PROJECT_NAME),
    ]
}

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub version: String,
    pub branch: String,
    pub commit_hash: String,
    pub start_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_directories_end_with_system_dir() {
        let directories = fallback_project_config_directories();

        assert_eq!(directories.last(), Some(&PathBuf::from("/etc/contact-relay")));
        assert!(directories.iter().all(|dir| dir.ends_with(PROJECT_NAME) || dir.ends_with(".contact-relay")));
    }

    #[test]
    fn test_server_info_serializes_camel_case() {
        let info = ServerInfo {
            version: PROJECT_VERSION.to_string(),
            branch: "main".to_string(),
            commit_hash: "abc1234".to_string(),
            start_time: Utc::now(),
        };
        let value = serde_json::to_value(&info).unwrap();

        assert_eq!(value["commitHash"], "abc1234");
        assert!(value.get("startTime").is_some());
    }
}
