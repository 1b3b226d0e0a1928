//! Configuration: YAML file plus environment overrides

use crate::analysis::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variables consulted for the API key, in priority order
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Settings for the analysis service and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VinarainConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub search_grounding: bool,
    pub request_timeout_secs: Option<u64>,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,

    /// File the settings were read from, if any
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,

    /// Environment variable that supplied `api_key`, if any
    #[serde(skip)]
    pub api_key_source: Option<String>,
}

impl Default for VinarainConfig {
    fn default() -> Self {
        let gemini = GeminiConfig::default();
        Self {
            api_key: None,
            model: gemini.model,
            endpoint: gemini.endpoint,
            search_grounding: gemini.search_grounding,
            request_timeout_secs: None,
            log_filter: "warn".to_string(),
            loaded_from: None,
            api_key_source: None,
        }
    }
}

impl VinarainConfig {
    /// Default config location (`~/.config/vinarain/config.yaml` on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vinarain").join("config.yaml"))
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parse config text; an empty document yields defaults
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load from an explicit path, or the default path if present, then apply
    /// environment overrides.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    /// Nothing is logged here since the subscriber is configured from the
    /// result; call [`VinarainConfig::log_sources`] once it is installed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.exists()),
        };
        let mut config = match path {
            Some(path) => {
                let mut config = Self::from_file(&path)?;
                config.loaded_from = Some(path);
                config
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Report where the settings came from
    pub fn log_sources(&self) {
        match &self.loaded_from {
            Some(path) => debug!(path = %path.display(), "loaded config"),
            None => debug!("no config file, using defaults"),
        }
        if let Some(var) = &self.api_key_source {
            info!(source = %var, "using API key from environment");
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let found = API_KEY_VARS
            .iter()
            .find_map(|var| lookup(*var).filter(|v| !v.trim().is_empty()).map(|v| (*var, v)));
        if let Some((var, key)) = found {
            self.api_key = Some(key);
            self.api_key_source = Some(var.to_string());
        }
    }

    /// Settings for [`crate::analysis::GeminiAnalyzer`]
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            search_grounding: self.search_grounding,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..GeminiConfig::default()
        }
    }
}
