/// Application configuration management
/// Stores user preferences in <config_dir>/simlab-dash/config.toml

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::{build_time_api_url, API_URL_ENV, APP_NAME, DEFAULT_REFRESH_INTERVAL};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the simulation service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Live refresh interval in humantime notation ("2s", "500ms")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<String>,

    /// Wire dashboard actions to the service by default
    #[serde(default)]
    pub live: bool,
}

impl AppConfig {
    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine the user config directory"))?;

        Ok(config_dir.join(APP_NAME).join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load configuration from a file; a missing file yields defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path()?)
    }

    /// Save configuration to a file, creating parent directories
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    /// Refresh interval, falling back to the default when unset
    pub fn refresh_interval(&self) -> Result<Duration> {
        match self.refresh_interval.as_deref() {
            Some(raw) => parse_interval(raw),
            None => Ok(DEFAULT_REFRESH_INTERVAL),
        }
    }

    /// Resolve the service base URL: CLI flag, environment, config file, build-time value
    pub fn resolve_api_url(&self, cli_url: Option<&str>) -> String {
        self.resolve_api_url_with_env(cli_url, std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_url_with_env(&self, cli_url: Option<&str>, env_url: Option<String>) -> String {
        let non_empty = |s: &str| !s.trim().is_empty();

        if let Some(url) = cli_url.filter(|u| non_empty(u)) {
            return url.to_string();
        }
        if let Some(url) = env_url.filter(|u| non_empty(u)) {
            return url;
        }
        if let Some(url) = self.api_url.as_deref().filter(|u| non_empty(u)) {
            return url.to_string();
        }
        build_time_api_url().to_string()
    }

    /// Set the refresh interval after validating it
    pub fn set_refresh_interval(&mut self, raw: &str) -> Result<()> {
        parse_interval(raw)?;
        self.refresh_interval = Some(raw.trim().to_string());
        Ok(())
    }
}

/// Parse a humantime interval, rejecting zero
pub fn parse_interval(raw: &str) -> Result<Duration> {
    let interval = humantime::parse_duration(raw.trim())
        .with_context(|| format!("Invalid refresh interval '{}'", raw))?;

    if interval.is_zero() {
        return Err(anyhow!("Refresh interval must be greater than zero"));
    }

    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(dir.path().join("config.toml")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(!config.live);
        assert_eq!(config.refresh_interval().unwrap(), DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig {
            api_url: Some("http://lab.local:8000/api".to_string()),
            refresh_interval: None,
            live: true,
        };
        config.set_refresh_interval("500ms").unwrap();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.refresh_interval().unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let mut config = AppConfig::default();
        assert!(config.set_refresh_interval("soon").is_err());
        assert!(config.set_refresh_interval("0s").is_err());
        assert_eq!(config.refresh_interval, None);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "live = \"not a bool").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_api_url_precedence() {
        let config = AppConfig {
            api_url: Some("http://from-file/api".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.resolve_api_url_with_env(Some("http://from-cli/api"), Some("http://from-env/api".to_string())),
            "http://from-cli/api"
        );
        assert_eq!(
            config.resolve_api_url_with_env(None, Some("http://from-env/api".to_string())),
            "http://from-env/api"
        );
        assert_eq!(
            config.resolve_api_url_with_env(None, Some("  ".to_string())),
            "http://from-file/api"
        );
        assert_eq!(
            AppConfig::default().resolve_api_url_with_env(None, None),
            build_time_api_url()
        );
    }
}
