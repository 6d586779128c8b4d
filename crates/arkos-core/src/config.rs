//! Client configuration.
//!
//! Configuration priority: `~/.config/arkos/config.toml` > environment
//! variables > built-in defaults. The file is optional; a missing file is
//! not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ArkosError, Result};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "ARKOS_BACKEND_URL";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration for the Arkos client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Arkos backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default location with env overrides.
    ///
    /// Reads `~/.config/arkos/config.toml` when present, then applies the
    /// `ARKOS_BACKEND_URL` environment variable on top.
    ///
    /// # Errors
    ///
    /// Returns an error only when an existing config file cannot be read or
    /// parsed; a missing file falls back to defaults.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        Ok(config)
    }

    /// Loads configuration from a specific TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ArkosError::config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| ArkosError::config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Returns the default config file path (`~/.config/arkos/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("arkos").join("config.toml"))
    }

    /// Overrides the base URL after construction.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://backend:9000\"\n").unwrap();

        let config = ClientConfig::load_from_path(&path).unwrap();
        assert_eq!(config.base_url, "http://backend:9000");
        // Missing fields fall back to defaults
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_from_path_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [not toml").unwrap();

        let err = ClientConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ArkosError::Config(_)));
    }

    #[test]
    fn test_with_base_url() {
        let config = ClientConfig::default().with_base_url("http://other:1234");
        assert_eq!(config.base_url, "http://other:1234");
    }
}
