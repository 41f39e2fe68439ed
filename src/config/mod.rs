//! # Configuration Management Module
//!
//! TOML-backed configuration for mqchat, organized into sections:
//!
//! - [`BrokerConfig`] - broker endpoint and keep-alive
//! - [`ChatConfig`] - the identity this process presents as
//! - [`StorageConfig`] - where chat logs are written
//! - [`LoggingConfig`] - log level and optional log file
//!
//! CLI arguments override config file values, which override defaults.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [broker]
//! host = "localhost"
//! port = 1883
//! keep_alive_secs = 30
//!
//! [chat]
//! identity = "cesar"
//!
//! [storage]
//! data_dir = "."
//!
//! [logging]
//! level = "info"
//! file = "mqchat.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub broker: BrokerConfig,
    pub chat: ChatConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Broker endpoint settings. One persistent connection is held for the
/// process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
}

fn default_keep_alive_secs() -> u64 {
    30
}

/// Chat settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// The name this process authors messages as; also the MQTT client id.
    pub identity: String,
}

/// Chat log storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory chat log files are written under.
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: ".".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Optional log file; keeps operational logs off the chat console.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: Some("mqchat.log".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            broker: BrokerConfig {
                host: "localhost".to_string(),
                port: 1883,
                keep_alive_secs: default_keep_alive_secs(),
            },
            chat: ChatConfig {
                identity: "cesar".to_string(),
            },
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
