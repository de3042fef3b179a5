use anyhow::{Context, Result, anyhow};
use chrono::Duration as TimeDelta;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Environment variable consulted when the config file holds no API key.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CACHE_TTL_MINUTES: i64 = 15;
/// Upper bound for `cache_ttl_minutes`: one week.
pub const MAX_CACHE_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 5
/// cache_ttl_minutes = 15
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub cache_ttl_minutes: Option<i64>,
}

/// Everything the upstream client needs, resolved once at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientSettings {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string()).filter(|k| !k.is_empty());
    }

    /// API key from the file, falling back to whatever `env` yields for [`API_KEY_ENV`].
    pub fn api_key(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        non_blank(self.api_key.clone()).or_else(|| non_blank(env(API_KEY_ENV)))
    }

    pub fn client_settings(&self, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
        ClientSettings {
            api_key: self.api_key(env),
            base_url: self.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }

    /// Settings using the process environment as the fallback source.
    pub fn client_settings_from_env(&self) -> ClientSettings {
        self.client_settings(|name| std::env::var(name).ok())
    }

    /// Configured TTL, clamped to `0..=MAX_CACHE_TTL_MINUTES`.
    pub fn cache_ttl(&self) -> TimeDelta {
        let minutes = self
            .cache_ttl_minutes
            .unwrap_or(DEFAULT_CACHE_TTL_MINUTES)
            .clamp(0, MAX_CACHE_TTL_MINUTES);
        TimeDelta::try_minutes(minutes)
            .unwrap_or_else(|| TimeDelta::minutes(DEFAULT_CACHE_TTL_MINUTES))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
