//! Client configuration

use crate::error::{ErrorContext, TalkError, TalkResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback API host used when neither the config file nor the environment
/// names one
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the configured API base URL
pub const API_BASE_URL_ENV: &str = "TALKTEMPLATE_API_BASE_URL";

/// Remote auth service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the auth service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

/// Local persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the session store file
    pub data_dir: String,
}

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                timeout_seconds: 30,
            },
            storage: StorageConfig {
                data_dir: "~/.talktemplate".to_string(),
            },
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TalkResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TalkError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: ClientConfig = toml::from_str(&content).map_err(|e| TalkError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> TalkResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| TalkError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| TalkError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> TalkResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(TalkError::Config {
                message: "API base_url must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.base_url or unset it to use the default"),
            });
        }

        if self.api.timeout_seconds == 0 {
            return Err(TalkError::Config {
                message: "API timeout_seconds must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.timeout_seconds to a positive value"),
            });
        }

        if self.storage.data_dir.trim().is_empty() {
            return Err(TalkError::Config {
                message: "Storage data_dir must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set storage.data_dir to a writable directory"),
            });
        }

        Ok(())
    }

    /// Effective API base URL: the environment override wins over the config
    /// value, trailing slashes stripped either way
    pub fn resolved_base_url(&self) -> String {
        let raw = std::env::var(API_BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone());
        raw.trim_end_matches('/').to_string()
    }
}
