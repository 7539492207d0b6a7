// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use things_cloud::CloudConfig;
use tokio::fs;

const THINGS_CONFIG_ENV: &str = "THINGS_CONFIG";

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Transport configuration, the `[cloud]` table.
    pub cloud: CloudConfig,

    /// Optional starting offset, skipping history before it.
    pub offset: Option<i64>,
}

#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(THINGS_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join("things/config.toml");
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|raw| Config {
            cloud: raw.cloud,
            offset: raw.offset,
        })
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    cloud: CloudConfig,
    #[serde(default)]
    offset: Option<i64>,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn parses_cloud_table_and_offset() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
offset = 1540

[cloud]
account = "my-history-key"
user_agent = "test-agent"
"#,
        )
        .unwrap();

        let config = parse_config(Some(config_path)).await.unwrap();
        assert_eq!(config.cloud.account, "my-history-key");
        assert_eq!(config.cloud.user_agent, "test-agent");
        assert_eq!(config.offset, Some(1540));
        // defaults fill in the rest
        assert_eq!(config.cloud.app_id, "com.culturedcode.ThingsMac");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nope.toml");
        assert!(parse_config(Some(config_path)).await.is_err());
    }
}
