use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "instagram-client";
const CONFIG_FILE: &str = "config.json";

/// Base URL of the Instagram v1 REST API
pub const API_URL: &str = "https://api.instagram.com/v1";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upper bound for a single request round trip. Zero disables the timeout.
    #[serde(default = "default_timeout")]
    pub timeout_sec: u64,
}

fn default_api_url() -> String {
    API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_sec: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Returns the request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_sec > 0).then(|| Duration::from_secs(self.timeout_sec))
    }
}

/// Loads and saves the configuration file
pub struct ConfigManager {
    config: ClientConfig,
    path: PathBuf,
}

impl ConfigManager {
    /// Creates a configuration manager for the default config location
    pub fn new() -> Result<Self> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        Self::with_path(config_dir.join(CONFIG_FILE))
    }

    /// Creates a configuration manager for a specific file
    ///
    /// A missing file yields the defaults. So does a file that fails to parse,
    /// with a warning.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = Self::load(&path)?;
        Ok(Self { config, path })
    }

    fn load(path: &Path) -> Result<ClientConfig> {
        if !path.exists() {
            return Ok(ClientConfig::default());
        }

        let data = std::fs::read_to_string(path).context("Failed to read config file")?;
        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid config file {}: {}", path.display(), e);
            ClientConfig::default()
        }))
    }

    /// Gets the current configuration
    pub fn get(&self) -> &ClientConfig {
        &self.config
    }

    /// Updates and saves the configuration
    pub fn save(&mut self, config: ClientConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        std::fs::write(&self.path, json).context("Failed to write config file")?;

        self.config = config;

        Ok(())
    }

    /// Returns the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Default value tests ===

    #[test]
    fn default_api_url_is_instagram_v1() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "https://api.instagram.com/v1");
    }

    #[test]
    fn default_timeout_is_30() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = ClientConfig {
            timeout_sec: 0,
            ..ClientConfig::default()
        };
        assert_eq!(config.timeout(), None);
    }

    // === Partial deserialization tests ===

    #[test]
    fn deserialize_empty_uses_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn deserialize_partial_uses_defaults_for_missing() {
        let json = r#"{"timeout_sec": 5, "unknown_field": true}"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.timeout_sec, 5);
        assert_eq!(config.api_url, API_URL);
    }

    // === ConfigManager tests ===

    #[test]
    fn manager_missing_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.json")).unwrap();

        assert_eq!(manager.get(), &ClientConfig::default());
    }

    #[test]
    fn manager_corrupt_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let manager = ConfigManager::with_path(path).unwrap();

        assert_eq!(manager.get(), &ClientConfig::default());
    }

    #[test]
    fn manager_save_then_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let updated = ClientConfig {
            api_url: "http://localhost:8080/v1".to_string(),
            timeout_sec: 3,
        };

        let mut manager = ConfigManager::with_path(&path).unwrap();
        manager.save(updated.clone()).unwrap();
        assert_eq!(manager.get(), &updated);

        let reloaded = ConfigManager::with_path(&path).unwrap();
        assert_eq!(reloaded.get(), &updated);
    }
}
