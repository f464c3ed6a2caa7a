//! Configuration management for codeagent.
//!
//! Configuration is loaded from `~/.config/codeagent/config.toml` (or the path
//! passed with `--config`). Every field is optional; a missing default file
//! means built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Region used when `--location` is not given.
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backing model configuration.
    #[serde(default)]
    pub model: ModelConfig,
}

/// Settings for the Vertex AI Gemini backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier (default: gemini-1.5-pro-preview-0409).
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Base URL override, e.g. a local emulator. When unset the regional
    /// Vertex AI host is derived from the location.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Request timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Sampling temperature passed as `generationConfig.temperature`.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Passed as `generationConfig.maxOutputTokens`.
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
    /// OAuth access token (prefer GOOGLE_OAUTH_ACCESS_TOKEN or gcloud).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            endpoint: None,
            timeout_secs: None,
            temperature: None,
            max_output_tokens: None,
            access_token: None,
        }
    }
}

fn default_model_name() -> String {
    "gemini-1.5-pro-preview-0409".to_string()
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("codeagent"))
            .context("Could not determine config directory")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path is optional and falls
    /// back to [`Config::default`].
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
