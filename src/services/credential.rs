//! Credential persistence service
//!
//! Stores the GitHub API token as `{"api_key": "<token>"}` in a single JSON
//! file. The file is created on save, read on load and removed on forget.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ApiToken;

/// File name used under the default data directory
pub const CREDENTIAL_FILE_NAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("API Key cannot be empty!")]
    EmptyToken,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unable to determine home directory")]
    NoHomeDirectory,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    #[serde(default)]
    api_key: String,
}

/// Reads and writes the token file
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the token, replacing any stored one
    pub fn save(&self, token: &ApiToken) -> Result<(), CredentialError> {
        if token.is_empty() {
            return Err(CredentialError::EmptyToken);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string(&StoredCredential {
            api_key: token.as_str().to_string(),
        })?;
        std::fs::write(&self.path, content)?;

        tracing::info!("Saved API key to {}", self.path.display());
        Ok(())
    }

    /// Load the stored token. A missing file or an empty key yields `None`.
    pub fn load(&self) -> Result<Option<ApiToken>, CredentialError> {
        if !self.path.exists() {
            tracing::debug!("No stored API key at {}", self.path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let stored: StoredCredential = serde_json::from_str(&content)?;

        let token = ApiToken::new(stored.api_key);
        Ok((!token.is_empty()).then_some(token))
    }

    /// Remove the stored token. Succeeds when nothing is stored.
    pub fn forget(&self) -> Result<(), CredentialError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            tracing::info!("Removed stored API key at {}", self.path.display());
        }
        Ok(())
    }
}

/// Get the default location of the credential file
///
/// Returns `~/.local/share/github-repo-scout/config.json` on Unix-like systems
pub fn default_credential_path() -> Result<PathBuf, CredentialError> {
    let home_dir = dirs::home_dir().ok_or(CredentialError::NoHomeDirectory)?;

    #[cfg(target_os = "macos")]
    let data_dir = home_dir.join("Library/Application Support/github-repo-scout");

    #[cfg(windows)]
    let data_dir = home_dir.join("AppData/Roaming/github-repo-scout");

    #[cfg(not(any(target_os = "macos", windows)))]
    let data_dir = home_dir.join(".local/share/github-repo-scout");

    Ok(data_dir.join(CREDENTIAL_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join("config.json"));

        store.save(&ApiToken::from("ghp_123")).unwrap();
        assert_eq!(store.load().unwrap(), Some(ApiToken::from("ghp_123")));
    }

    #[test]
    fn test_forget_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join("config.json"));

        store.save(&ApiToken::from("ghp_123")).unwrap();
        store.forget().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_empty_token_not_saved() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join("config.json"));

        assert!(matches!(
            store.save(&ApiToken::from("   ")),
            Err(CredentialError::EmptyToken)
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join("config.json"));
        store.save(&ApiToken::from("abc")).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({"api_key": "abc"}));
    }
}
