use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::AccessToken;

const SERVICE_NAME: &str = "instagram-client";
const TOKEN_FILE: &str = "token.json";

/// Token record as persisted on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    #[serde(flatten)]
    token: AccessToken,
    saved_at: DateTime<Utc>,
}

/// Token store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No token stored")]
    NoToken,
    #[error("Stored token is empty")]
    EmptyToken,
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Trait for token storage operations
///
/// The token itself is obtained out of band; this only keeps it between runs.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Saves the access token
    async fn save(&self, token: &AccessToken) -> Result<()>;

    /// Loads the stored access token
    async fn load(&self) -> Result<AccessToken, StoreError>;

    /// Deletes the stored token
    async fn delete(&self) -> Result<()>;

    /// Checks if a token is stored
    async fn has_token(&self) -> bool;
}

/// Token storage backed by a JSON file, mirrored into the OS keyring when one
/// is available
pub struct FileTokenStore {
    keyring_entry: Option<keyring::Entry>,
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a token store in the application config directory
    pub fn new() -> Result<Self> {
        let config_dir = crate::config::ConfigManager::config_dir()?;
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        Ok(Self {
            keyring_entry: keyring::Entry::new(SERVICE_NAME, "access_token").ok(),
            path: config_dir.join(TOKEN_FILE),
        })
    }

    /// Creates a token store with a custom path (for testing)
    #[cfg(test)]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            keyring_entry: None,
            path,
        }
    }

    fn parse(data: &str) -> Result<AccessToken, StoreError> {
        let stored: StoredToken = serde_json::from_str(data)
            .context("Failed to parse stored token")
            .map_err(StoreError::Storage)?;

        if !stored.token.is_valid() {
            return Err(StoreError::EmptyToken);
        }

        tracing::debug!("Loaded token saved at {}", stored.saved_at);
        Ok(stored.token)
    }
}

#[async_trait]
impl TokenStorage for FileTokenStore {
    async fn save(&self, token: &AccessToken) -> Result<()> {
        let stored = StoredToken {
            token: token.clone(),
            saved_at: Utc::now(),
        };
        let data = serde_json::to_string(&stored).context("Failed to serialize token")?;

        std::fs::write(&self.path, &data).context("Failed to write token file")?;

        if let Some(ref entry) = self.keyring_entry {
            if let Err(e) = entry.set_password(&data) {
                tracing::warn!("Keyring unavailable, token kept in file only: {}", e);
            }
        }

        Ok(())
    }

    async fn load(&self) -> Result<AccessToken, StoreError> {
        if self.path.exists() {
            let data = std::fs::read_to_string(&self.path)
                .context("Failed to read token file")
                .map_err(StoreError::Storage)?;
            return Self::parse(&data);
        }

        if let Some(ref entry) = self.keyring_entry {
            if let Ok(data) = entry.get_password() {
                return Self::parse(&data);
            }
        }

        Err(StoreError::NoToken)
    }

    async fn delete(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to delete token file")?;
        }

        if let Some(ref entry) = self.keyring_entry {
            let _ = entry.delete_credential();
        }

        Ok(())
    }

    async fn has_token(&self) -> bool {
        self.load().await.is_ok()
    }
}
