//! Configuration management for cdp-dispatch

use crate::dispatch::DecodeFailurePolicy;
use crate::pattern::UrlFilter;
use crate::{Error, Result};
use serde::Deserialize;
use std::env;

/// Dispatch configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,

    /// Handling of payloads that fail to decode under a matching tag
    pub decode_failure: DecodeFailurePolicy,

    /// URL include patterns, tried in order
    pub include_patterns: Vec<String>,

    /// URL exclude patterns
    pub exclude_patterns: Vec<String>,

    /// Stop after this many admitted events
    pub stop_after: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            decode_failure: DecodeFailurePolicy::Skip,
            include_patterns: vec![".*".to_string()],
            exclude_patterns: Vec::new(),
            stop_after: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given (defaults otherwise), then apply environment overrides
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Reject settings that parse but cannot be honoured
    pub fn validate(&self) -> Result<()> {
        if self.stop_after == Some(0) {
            return Err(Error::configuration("stop_after must be at least 1"));
        }
        Ok(())
    }

    /// Build the URL filter described by the pattern lists
    pub fn url_filter(&self) -> Result<UrlFilter> {
        UrlFilter::new(&self.include_patterns, &self.exclude_patterns)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(log_level) = env::var("CDP_DISPATCH_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(policy) = env::var("CDP_DISPATCH_DECODE_FAILURE") {
            self.decode_failure = policy.parse()?;
        }

        if let Ok(includes) = env::var("CDP_DISPATCH_INCLUDE") {
            self.include_patterns = split_list(&includes);
        }

        if let Ok(excludes) = env::var("CDP_DISPATCH_EXCLUDE") {
            self.exclude_patterns = split_list(&excludes);
        }

        if let Ok(stop_after) = env::var("CDP_DISPATCH_STOP_AFTER") {
            self.stop_after = Some(
                stop_after
                    .parse()
                    .map_err(|_| Error::configuration("Invalid CDP_DISPATCH_STOP_AFTER"))?,
            );
        }

        self.validate()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
