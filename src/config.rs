//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Journal storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("symptomsense").to_string_lossy().to_string())
        .unwrap_or_else(|| "./symptomsense_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Symptom assistant (chat-completions endpoint) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Bearer key. Without one the assistant runs in demo mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "google/gemini-2.0-flash-001".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

impl AssistantConfig {
    /// True when no usable API key is configured
    pub fn demo_mode(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| key.trim().is_empty() || key == "demo-key")
            .unwrap_or(true)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Search the standard locations, falling back to defaults with
    /// environment overrides. Nothing is logged; see [`ConfigLoad::log`].
    pub fn search_default() -> ConfigLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("symptomsense").join("config.toml")),
            Some(PathBuf::from("/etc/symptomsense/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::search(&config_paths)
    }

    /// First of `paths` that exists and loads. Files that exist but fail to
    /// load are skipped and reported in [`ConfigLoad::errors`].
    pub fn search(paths: &[PathBuf]) -> ConfigLoad {
        let mut errors = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return ConfigLoad {
                        config,
                        source: Some(path.clone()),
                        errors,
                    };
                }
                Err(e) => errors.push(e),
            }
        }

        ConfigLoad {
            config: Self::from_env(),
            source: None,
            errors,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(data_dir) = lookup("SYMPTOMSENSE_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Assistant overrides
        if let Some(key) = lookup("SYMPTOMSENSE_API_KEY").or_else(|| lookup("OPENROUTER_API_KEY")) {
            self.assistant.api_key = Some(key);
        }
        if let Some(url) = lookup("SYMPTOMSENSE_API_URL") {
            self.assistant.base_url = url;
        }
        if let Some(model) = lookup("SYMPTOMSENSE_MODEL") {
            self.assistant.model = model;
        }

        // Logging overrides
        if let Some(level) = lookup("SYMPTOMSENSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SYMPTOMSENSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of a config search
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    /// File the config came from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Files that exist but could not be loaded
    pub errors: Vec<ConfigError>,
}

impl ConfigLoad {
    /// Config read from an explicitly named file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            config: Config::load_with_env(path)?,
            source: Some(path.to_path_buf()),
            errors: Vec::new(),
        })
    }

    /// Report the search. Call once a subscriber is installed.
    pub fn log(&self) {
        for error in &self.errors {
            tracing::warn!("Skipping config: {}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# SymptomSense Configuration
#
# Environment variables override these settings:
# - SYMPTOMSENSE_DATA_DIR
# - SYMPTOMSENSE_API_KEY (or OPENROUTER_API_KEY)
# - SYMPTOMSENSE_API_URL
# - SYMPTOMSENSE_MODEL
# - SYMPTOMSENSE_LOG_LEVEL
# - SYMPTOMSENSE_LOG_FORMAT

[storage]
# Directory holding symptomsense_entries.json and symptomsense_recommendations.json
data_dir = "~/.local/share/symptomsense"

[assistant]
# API key for the chat-completions endpoint. Leave unset for demo mode.
# api_key = ""

# OpenAI-compatible endpoint
base_url = "https://openrouter.ai/api/v1"

# Model identifier
model = "google/gemini-2.0-flash-001"

# Sampling temperature
temperature = 0.7

# Maximum tokens in a reply
max_tokens = 1500

# Request timeout in seconds
request_timeout_secs = 30

# Attempts for transport failures and rate limiting
max_retries = 3

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
