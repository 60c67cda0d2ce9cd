//! TOML-based application configuration.
//!
//! Stores the endpoints of the three companion services and the terminal
//! pacing preferences. Stored at `~/.config/habitkeeper/config.toml`; a
//! missing file is replaced with defaults on first load.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, Result};
use crate::store::data_dir;

/// Service endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_timer_url")]
    pub timer_url: String,
    #[serde(default = "default_reminder_url")]
    pub reminder_url: String,
    #[serde(default = "default_formatter_url")]
    pub formatter_url: String,
    /// Per-request timeout for all gateway calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Terminal presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Per-character delay of the paced output. 0 disables pacing.
    #[serde(default = "default_typewriter_delay_ms")]
    pub typewriter_delay_ms: u64,
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habitkeeper/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

// Default functions
fn default_timer_url() -> String {
    "http://localhost:3001".into()
}
fn default_reminder_url() -> String {
    "http://localhost:3000".into()
}
fn default_formatter_url() -> String {
    "http://localhost:3002".into()
}
fn default_timeout_secs() -> u64 {
    2
}
fn default_typewriter_delay_ms() -> u64 {
    10
}
fn default_true() -> bool {
    true
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            timer_url: default_timer_url(),
            reminder_url: default_reminder_url(),
            formatter_url: default_formatter_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            typewriter_delay_ms: default_typewriter_delay_ms(),
            clear_screen: true,
        }
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

impl ServicesConfig {
    pub fn timer_endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("services.timer_url", &self.timer_url)
    }

    pub fn reminder_endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("services.reminder_url", &self.reminder_url)
    }

    pub fn formatter_endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("services.formatter_url", &self.formatter_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default config on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.services.timer_url, "http://localhost:3001");
        assert_eq!(parsed.services.timeout_secs, 2);
        assert_eq!(parsed.ui.typewriter_delay_ms, 10);
        assert!(parsed.ui.clear_screen);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.services.reminder_url, "http://localhost:3000");
        assert_eq!(parsed.services.formatter_url, "http://localhost:3002");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let parsed: Config =
            toml::from_str("[services]\ntimer_url = \"http://10.0.0.5:9001\"\n").unwrap();
        assert_eq!(parsed.services.timer_url, "http://10.0.0.5:9001");
        assert_eq!(parsed.services.timeout_secs, 2);
    }

    #[test]
    fn endpoints_parse_as_urls() {
        let cfg = ServicesConfig::default();
        assert_eq!(cfg.timer_endpoint().unwrap().as_str(), "http://localhost:3001/");
        assert!(cfg.reminder_endpoint().is_ok());
        assert!(cfg.formatter_endpoint().is_ok());
    }

    #[test]
    fn bad_endpoint_is_an_invalid_value_error() {
        let cfg = ServicesConfig {
            timer_url: "not a url".into(),
            ..ServicesConfig::default()
        };
        assert!(matches!(
            cfg.timer_endpoint(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
