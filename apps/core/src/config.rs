//! Engine configuration, read from the environment (and `.env` when present).

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

use crate::error::{AnalysisError, Result};

pub const DEFAULT_SUMMARIZER_URL: &str = "http://localhost:8080";
pub const DEFAULT_SUMMARIZER_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_EMBEDDINGS_CACHE_DIR: &str = "data/models/embeddings";
pub const DEFAULT_EMBEDDING_CACHE_SIZE: usize = 1000;
pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 300;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AnalysisError::Config(format!(
                "Invalid LOG_FORMAT '{}'. Must be 'pretty' or 'json'",
                other
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    #[validate(url)]
    pub summarizer_url: String,
    pub summarizer_auth_token: Option<String>,
    pub summarizer_enabled: bool,
    #[validate(range(min = 1, max = 600))]
    pub summarizer_timeout_secs: u64,
    pub embeddings_enabled: bool,
    pub embeddings_cache_dir: PathBuf,
    #[validate(range(min = 1))]
    pub embedding_cache_size: usize,
    #[validate(range(min = 1))]
    pub analysis_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            summarizer_url: DEFAULT_SUMMARIZER_URL.to_string(),
            summarizer_auth_token: None,
            summarizer_enabled: true,
            summarizer_timeout_secs: DEFAULT_SUMMARIZER_TIMEOUT_SECS,
            embeddings_enabled: true,
            embeddings_cache_dir: PathBuf::from(DEFAULT_EMBEDDINGS_CACHE_DIR),
            embedding_cache_size: DEFAULT_EMBEDDING_CACHE_SIZE,
            analysis_timeout_secs: DEFAULT_ANALYSIS_TIMEOUT_SECS,
            log_format: LogFormat::Pretty,
        }
    }
}

impl EngineConfig {
    /// Load `.env` (if any), then read the environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_process_env()
    }

    /// Read the process environment only. Unset variables keep their defaults.
    pub fn from_process_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            summarizer_url: var("SUMMARIZER_URL").unwrap_or(defaults.summarizer_url),
            summarizer_auth_token: var("SUMMARIZER_AUTH_TOKEN"),
            summarizer_enabled: parse_var("SUMMARIZER_ENABLED", parse_bool)?
                .unwrap_or(defaults.summarizer_enabled),
            summarizer_timeout_secs: parse_var("SUMMARIZER_TIMEOUT_SECS", parse_number)?
                .unwrap_or(defaults.summarizer_timeout_secs),
            embeddings_enabled: parse_var("EMBEDDINGS_ENABLED", parse_bool)?
                .unwrap_or(defaults.embeddings_enabled),
            embeddings_cache_dir: var("EMBEDDINGS_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.embeddings_cache_dir),
            embedding_cache_size: parse_var("EMBEDDING_CACHE_SIZE", parse_number)?
                .unwrap_or(defaults.embedding_cache_size),
            analysis_timeout_secs: parse_var("ANALYSIS_TIMEOUT_SECS", parse_number)?
                .unwrap_or(defaults.analysis_timeout_secs),
            log_format: parse_var("LOG_FORMAT", |_, v| v.parse())?
                .unwrap_or(defaults.log_format),
        };
        config.check()?;
        Ok(config)
    }

    /// Validate field ranges and the summarizer URL.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AnalysisError::Config(format!("Invalid engine configuration: {}", e)))?;
        Url::parse(&self.summarizer_url)?;
        Ok(())
    }

    pub fn summarizer_timeout(&self) -> Duration {
        Duration::from_secs(self.summarizer_timeout_secs)
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    pub fn embedding_cache_capacity(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.embedding_cache_size).ok_or_else(|| {
            AnalysisError::Config("EMBEDDING_CACHE_SIZE must be at least 1".to_string())
        })
    }
}

/// Non-empty value of `key`
fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(key: &str, parse: impl Fn(&str, &str) -> Result<T>) -> Result<Option<T>> {
    var(key).map(|v| parse(key, &v)).transpose()
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AnalysisError::Config(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        AnalysisError::Config(format!("{} must be a positive integer, got '{}'", key, value))
    })
}
