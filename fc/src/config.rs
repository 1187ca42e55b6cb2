//! Application configuration types and loading

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Context, Result};
use ollamaclient::{ClientConfig, ModelParams};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model service connection settings
    pub service: ServiceConfig,

    /// Default sampling parameters sent with every request
    pub params: ModelParams,

    /// Prompt template selection
    pub template: TemplateConfig,

    /// Web backend settings
    pub web: WebConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .fossilchat.yml
        let local_config = PathBuf::from(".fossilchat.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/fossilchat/fossilchat.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("fossilchat").join("fossilchat.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Settings for constructing the model service client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.service.base_url.clone(),
            model: self.service.model.clone(),
            params: self.params.clone(),
            min_request_interval: Duration::from_millis(self.service.min_request_interval_ms),
            request_timeout: Duration::from_millis(self.service.timeout_ms),
            tags_cache_ttl: Duration::from_secs(self.service.tags_cache_ttl_secs),
        }
    }

    /// The shorter wait ceiling used by the interactive chat loop
    pub fn chat_timeout(&self) -> Duration {
        Duration::from_millis(self.service.chat_timeout_ms)
    }
}

/// Model service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the service API
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Default request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Shorter timeout used by the interactive chat loop, in milliseconds
    #[serde(rename = "chat-timeout-ms")]
    pub chat_timeout_ms: u64,

    /// Minimum interval between consecutive requests, in milliseconds
    #[serde(rename = "min-request-interval-ms")]
    pub min_request_interval_ms: u64,

    /// How long a model listing stays cached, in seconds
    #[serde(rename = "tags-cache-ttl-secs")]
    pub tags_cache_ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/api".to_string(),
            model: "nezahatkorkmaz/deepseek-v3:latest".to_string(),
            timeout_ms: 30_000,
            chat_timeout_ms: 15_000,
            min_request_interval_ms: 100,
            tags_cache_ttl_secs: 60,
        }
    }
}

/// Prompt template selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Name of the active template; unknown names fall back to the default
    pub active: String,

    /// Extra substitution variables made available to the user format string
    pub variables: HashMap<String, String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            active: "fossil-advice".to_string(),
            variables: HashMap::new(),
        }
    }
}

/// Web backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address for `fc serve`
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}
