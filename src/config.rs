use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{RepoChatError, Result};
use crate::landing::DEFAULT_NAVIGATION_DELAY;
use crate::state::PresentationMode;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "REPOCHAT_API_URL";

/// On-disk configuration; every field is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub navigation_delay_secs: Option<u64>,
    pub dark_mode: Option<bool>,
    pub log_file: Option<PathBuf>,
}

/// Values given on the command line, which win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub navigation_delay_secs: Option<u64>,
    pub light: bool,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings handed to the application at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub navigation_delay: Duration,
    pub presentation_mode: PresentationMode,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Read a config file, falling back to defaults when it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            RepoChatError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            RepoChatError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RepoChatError::Config("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("repochat").join("config.json"))
    }

    /// Merge with the environment value and CLI overrides.
    ///
    /// Base URL precedence: CLI, then `REPOCHAT_API_URL`, then this file, then
    /// [`DEFAULT_API_URL`].
    pub fn resolve(&self, env_api_url: Option<String>, overrides: Overrides) -> Result<Settings> {
        let base_url = overrides
            .api_url
            .or(env_api_url)
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RepoChatError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let navigation_delay = overrides
            .navigation_delay_secs
            .or(self.navigation_delay_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_NAVIGATION_DELAY);

        let presentation_mode = if overrides.light {
            PresentationMode::Light
        } else {
            PresentationMode::from_dark_flag(self.dark_mode.unwrap_or(true))
        };

        Ok(Settings {
            base_url,
            navigation_delay,
            presentation_mode,
            log_file: overrides.log_file.or_else(|| self.log_file.clone()),
        })
    }
}
