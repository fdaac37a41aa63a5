//! Configuration management
//!
//! Configuration loads from environment variables or a TOML file; the
//! env form wins for deployments, the file form for local development.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::inference::InferenceConfig;
use crate::llm::LlmConfig;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Inference backend configuration
    pub inference: InferenceConfig,

    /// Optional LLM annotation configuration
    pub llm: LlmSection,

    /// Analysis limits and windows
    pub analysis: AnalysisConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,

    /// Keep entries in memory only (testing, demos)
    pub in_memory: bool,
}

/// LLM section with an enable switch around the client config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSection {
    /// Whether LLM annotations are attempted at all
    pub enabled: bool,

    #[serde(flatten)]
    pub client: LlmConfig,
}

/// Analysis limits and windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum accepted text length in characters
    pub max_text_len: usize,

    /// Default history window in days
    pub default_window_days: u32,

    /// Maximum accepted history window in days
    pub max_window_days: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("KOKORO_HOST").unwrap_or(defaults.server.host);
        let port = std::env::var("KOKORO_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.server.port);

        let sqlite_path = std::env::var("KOKORO_SQLITE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.database.sqlite_path);
        let in_memory = std::env::var("KOKORO_IN_MEMORY")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let inference_endpoint =
            std::env::var("KOKORO_INFERENCE_ENDPOINT").unwrap_or(defaults.inference.endpoint);
        let inference_timeout = std::env::var("KOKORO_INFERENCE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.inference.timeout_secs);
        let inference_retries = std::env::var("KOKORO_INFERENCE_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.inference.max_retries);

        let llm_enabled = std::env::var("KOKORO_LLM_ENABLED")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let max_text_len = std::env::var("KOKORO_MAX_TEXT_LEN")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.analysis.max_text_len);

        let level = std::env::var("KOKORO_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let format = std::env::var("KOKORO_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                sqlite_path,
                in_memory,
            },
            inference: InferenceConfig {
                endpoint: inference_endpoint,
                timeout_secs: inference_timeout,
                max_retries: inference_retries,
            },
            llm: LlmSection {
                enabled: llm_enabled,
                client: LlmConfig::from_env(),
            },
            analysis: AnalysisConfig {
                max_text_len,
                ..defaults.analysis
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server port must be greater than 0");
        }

        if self.analysis.max_text_len == 0 {
            anyhow::bail!("max_text_len must be greater than 0");
        }

        if self.analysis.default_window_days == 0
            || self.analysis.default_window_days > self.analysis.max_window_days
        {
            anyhow::bail!(
                "default_window_days must be within 1..={}",
                self.analysis.max_window_days
            );
        }

        if self.inference.timeout_secs == 0 {
            anyhow::bail!("inference timeout must be greater than 0");
        }

        Ok(())
    }

    /// Get inference timeout as Duration
    #[must_use]
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: String::from("0.0.0.0"),
                port: 8080,
            },
            database: DatabaseConfig {
                sqlite_path: PathBuf::from("data/kokoro.db"),
                in_memory: false,
            },
            inference: InferenceConfig::default(),
            llm: LlmSection {
                enabled: false,
                client: LlmConfig::default(),
            },
            analysis: AnalysisConfig {
                max_text_len: 5000,
                default_window_days: 30,
                max_window_days: 365,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_text_limit_rejected() {
        let mut config = Config::default();
        config.analysis.max_text_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_bounds_rejected() {
        let mut config = Config::default();
        config.analysis.default_window_days = 9999;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kokoro.toml");
        std::fs::write(
            &path,
            r#"
                [server]
                host = "127.0.0.1"
                port = 9090

                [database]
                sqlite_path = "/tmp/kokoro.db"
                in_memory = true

                [inference]
                endpoint = "http://inference:8500"
                timeout_secs = 5
                max_retries = 1

                [llm]
                enabled = false
                endpoint = "http://localhost:11434"
                model = "qwen2.5:7b"
                timeout_secs = 30
                max_tokens = 512
                temperature = 0.2

                [analysis]
                max_text_len = 2000
                default_window_days = 14
                max_window_days = 90

                [logging]
                level = "debug"
                format = "json"
            "#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(config.database.in_memory);
        assert_eq!(config.analysis.default_window_days, 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inference_timeout_conversion() {
        let config = Config::default();
        assert_eq!(config.inference_timeout(), Duration::from_secs(10));
    }
}
