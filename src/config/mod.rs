//! Configuration management for the baeum pipeline
//!
//! This module handles loading and validating configuration from
//! environment variables and TOML files.

use crate::llm::LlmConfig;
use crate::search::SearchConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Search collaborator configuration
    pub search: SearchConfig,

    /// Generation collaborator configuration
    pub llm: LlmConfig,

    /// Content cache configuration
    pub cache: CacheConfig,

    /// Pipeline configuration
    pub generator: GeneratorConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Content cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one blob file per fingerprint
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/content_cache"),
        }
    }
}

/// Pipeline (unit assembler) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Pages searched and extracted per text unit
    pub pages_per_unit: usize,

    /// Candidate videos considered per video unit
    pub videos_per_unit: usize,

    /// Target total viewing duration per video unit, in seconds
    pub video_target_secs: u64,

    /// Target study time per text unit, in minutes
    pub target_minutes: u32,

    /// Bounded fan-out across unit indices
    pub concurrency: usize,

    /// Maximum extraction fetches per second
    pub extract_rps: u32,

    /// Extraction fetch timeout in seconds
    pub extract_timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            pages_per_unit: 2,
            videos_per_unit: 10,
            video_target_secs: 3600,
            target_minutes: 120,
            concurrency: 4,
            extract_rps: 2,
            extract_timeout_secs: 20,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let cache_dir = std::env::var("BAEUM_CACHE_DIR")
            .unwrap_or_else(|_| String::from("data/content_cache"))
            .into();

        let mut generator = GeneratorConfig::default();
        if let Some(v) = env_parse::<usize>("BAEUM_PAGES_PER_UNIT") {
            generator.pages_per_unit = v;
        }
        if let Some(v) = env_parse::<usize>("BAEUM_VIDEOS_PER_UNIT") {
            generator.videos_per_unit = v;
        }
        if let Some(v) = env_parse::<u64>("BAEUM_VIDEO_TARGET_SECS") {
            generator.video_target_secs = v;
        }
        if let Some(v) = env_parse::<u32>("BAEUM_TARGET_MINUTES") {
            generator.target_minutes = v;
        }
        if let Some(v) = env_parse::<usize>("BAEUM_CONCURRENCY") {
            generator.concurrency = v;
        }
        if let Some(v) = env_parse::<u32>("BAEUM_EXTRACT_RPS") {
            generator.extract_rps = v;
        }
        if let Some(v) = env_parse::<u64>("BAEUM_EXTRACT_TIMEOUT") {
            generator.extract_timeout_secs = v;
        }

        let logging = LoggingConfig {
            level: std::env::var("BAEUM_LOG_LEVEL").unwrap_or_else(|_| String::from("info")),
            format: std::env::var("BAEUM_LOG_FORMAT").unwrap_or_else(|_| String::from("text")),
        };

        Ok(Self {
            search: SearchConfig::from_env(),
            llm: LlmConfig::from_env(),
            cache: CacheConfig { dir: cache_dir },
            generator,
            logging,
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
        if self.generator.pages_per_unit == 0 {
            anyhow::bail!("pages_per_unit must be greater than 0");
        }

        if self.generator.videos_per_unit == 0 {
            anyhow::bail!("videos_per_unit must be greater than 0");
        }

        if self.generator.video_target_secs == 0 {
            anyhow::bail!("video_target_secs must be greater than 0");
        }

        if self.generator.concurrency == 0 {
            anyhow::bail!("concurrency must be greater than 0");
        }

        if self.generator.extract_rps == 0 {
            anyhow::bail!("extract_rps must be greater than 0");
        }

        Ok(())
    }

    /// Get extraction fetch timeout as Duration
    #[must_use]
    pub fn extract_timeout(&self) -> Duration {
        Duration::from_secs(self.generator.extract_timeout_secs)
    }
}

/// Parse an environment variable, None when unset or malformed
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
