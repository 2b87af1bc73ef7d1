// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use raplamobile_core::{APP_NAME, Config as CoreConfig};

const RAPLA_CONFIG_ENV: &str = "RAPLA_CONFIG";
const RAPLA_DEV_ENV: &str = "RAPLA_DEV";

const RAPLA_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const RAPLA_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Resolves and reads the configuration file: `--config` first, then
/// `$RAPLA_CONFIG`, then the per-user default location.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(RAPLA_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({RAPLA_DEV_ENV} is set): config must be explicitly specified via --config or {RAPLA_CONFIG_ENV} environment variable",
            ).into());
        }
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| (a.core, a.cli))
}

/// Configuration of the command line client.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Dynamic type key of the resources offered when booking.
    #[serde(default)]
    pub default_category: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    core: CoreConfig,

    #[serde(default)]
    cli: Config,
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
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(RAPLA_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if RAPLA_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if RAPLA_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            RAPLA_DEV_ENV,
            val,
            RAPLA_DEV_VALID_TRUE.join(", "),
            RAPLA_DEV_VALID_FALSE.join(", ")
        );
        None
    }
}
