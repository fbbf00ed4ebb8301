//! Configuration loading and validation for Pathcraft.
//!
//! Loads configuration from a TOML file with environment variable overrides.
//! Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The root configuration structure.
///
/// Maps directly to `pathcraft.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Job queue configuration
    #[serde(default)]
    pub queue: QueueConfig,

    /// Resource retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// HTTP gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Worker pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Number of parallel workers pulling jobs
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Maximum jobs held in the store before oldest terminal jobs are evicted
    #[serde(default = "default_max_jobs")]
    pub max_jobs: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            max_jobs: default_max_jobs(),
        }
    }
}

/// Resource retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Which retriever backend to use. Currently only "catalog".
    #[serde(default = "default_retrieval_mode")]
    pub mode: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            mode: default_retrieval_mode(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8000
}
fn default_workers() -> usize {
    4
}
fn default_max_jobs() -> usize {
    1_000
}
fn default_retrieval_mode() -> String {
    "catalog".into()
}

impl AppConfig {
    /// Load configuration from `pathcraft.toml` in the working directory,
    /// falling back to defaults when the file is absent, then apply
    /// environment variable overrides:
    /// - `PATHCRAFT_HOST`
    /// - `PATHCRAFT_PORT`
    /// - `PATHCRAFT_WORKERS`
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(Path::new("pathcraft.toml"))?;

        if let Ok(host) = std::env::var("PATHCRAFT_HOST") {
            config.gateway.host = host;
        }
        if let Ok(port) = std::env::var("PATHCRAFT_PORT") {
            config.gateway.port = port
                .parse()
                .map_err(|_| ConfigError::Validation(format!("PATHCRAFT_PORT invalid: {port}")))?;
        }
        if let Ok(workers) = std::env::var("PATHCRAFT_WORKERS") {
            config.queue.workers = workers.parse().map_err(|_| {
                ConfigError::Validation(format!("PATHCRAFT_WORKERS invalid: {workers}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue.workers == 0 {
            return Err(ConfigError::Validation(
                "queue.workers must be at least 1".into(),
            ));
        }
        if self.queue.max_jobs == 0 {
            return Err(ConfigError::Validation(
                "queue.max_jobs must be at least 1".into(),
            ));
        }
        if self.retrieval.mode != "catalog" {
            return Err(ConfigError::Validation(format!(
                "unknown retrieval.mode '{}' (expected \"catalog\")",
                self.retrieval.mode
            )));
        }
        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Validation(String),
}
