//! Configuration types for both pipeline stages
//!
//! Configuration is an explicit value handed to the driver and the landing
//! producer at construction. Environment variables are only consulted by the
//! `apply_env*` helpers, which the CLI calls at start-up.

use crate::error::{Error, Result, ResultExt};
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Field of the API response holding the daily series
pub const DAILY_SERIES_FIELD: &str = "Time Series (Daily)";

/// Filename suffix of landed raw responses
pub const RAW_SUFFIX_TOKEN: &str = "raw-data-api-response.json";

/// Filename suffix of converted JSONL artifacts
pub const CONVERTED_SUFFIX_TOKEN: &str = "converted-data-api-response.jsonl";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML or JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage backend URL (`s3://`, `gs://`, `az://`, `memory://`, `file:///path`)
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Log level for the binary
    #[serde(default)]
    pub log_level: LogLevel,

    /// Reshape stage settings
    #[serde(default)]
    pub reshape: ReshapeConfig,

    /// Landing stage settings
    #[serde(default)]
    pub landing: LandingConfig,
}

fn default_store_url() -> String {
    "s3://".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            log_level: LogLevel::default(),
            reshape: ReshapeConfig::default(),
            landing: LandingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from a YAML (or JSON) string
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
    }

    /// Apply process environment overrides to both stages
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.reshape.apply_env_from(&lookup);
        self.landing.apply_env_from(&lookup);
    }
}

// ============================================================================
// Reshape Config
// ============================================================================

/// Settings of the reshape driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeConfig {
    /// Container receiving converted objects
    #[serde(default)]
    pub destination_container: String,

    /// Key prefix ("layer") of converted objects
    #[serde(default = "default_layer_prefix")]
    pub destination_layer_prefix: String,

    /// Token identifying a raw response in the source filename
    #[serde(default = "default_raw_suffix")]
    pub source_raw_suffix_token: String,

    /// Token replacing the raw token in the output filename
    #[serde(default = "default_converted_suffix")]
    pub destination_converted_suffix_token: String,

    /// Top-level field holding the time series
    #[serde(default = "default_series_field")]
    pub series_field_name: String,
}

fn default_layer_prefix() -> String {
    "converted".to_string()
}

fn default_raw_suffix() -> String {
    RAW_SUFFIX_TOKEN.to_string()
}

fn default_converted_suffix() -> String {
    CONVERTED_SUFFIX_TOKEN.to_string()
}

fn default_series_field() -> String {
    DAILY_SERIES_FIELD.to_string()
}

impl Default for ReshapeConfig {
    fn default() -> Self {
        Self {
            destination_container: String::new(),
            destination_layer_prefix: default_layer_prefix(),
            source_raw_suffix_token: default_raw_suffix(),
            destination_converted_suffix_token: default_converted_suffix(),
            series_field_name: default_series_field(),
        }
    }
}

impl ReshapeConfig {
    /// Create a config writing into the given container with default tokens
    pub fn new(destination_container: impl Into<String>) -> Self {
        Self {
            destination_container: destination_container.into(),
            ..Default::default()
        }
    }

    /// Set the destination layer prefix
    #[must_use]
    pub fn with_layer_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.destination_layer_prefix = prefix.into();
        self
    }

    /// Set the raw/converted suffix token pair
    #[must_use]
    pub fn with_suffix_tokens(
        mut self,
        raw: impl Into<String>,
        converted: impl Into<String>,
    ) -> Self {
        self.source_raw_suffix_token = raw.into();
        self.destination_converted_suffix_token = converted.into();
        self
    }

    /// Set the series field name
    #[must_use]
    pub fn with_series_field(mut self, field: impl Into<String>) -> Self {
        self.series_field_name = field.into();
        self
    }

    /// Override from `BUCKET_NAME` and `DESTINY_LAYER`
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bucket) = lookup("BUCKET_NAME") {
            self.destination_container = bucket;
        }
        if let Some(layer) = lookup("DESTINY_LAYER") {
            self.destination_layer_prefix = layer;
        }
    }

    /// Reject settings the driver cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.destination_container.is_empty() {
            return Err(Error::missing_field("destination_container"));
        }
        if self.source_raw_suffix_token.is_empty() {
            return Err(Error::missing_field("source_raw_suffix_token"));
        }
        if self.series_field_name.is_empty() {
            return Err(Error::missing_field("series_field_name"));
        }
        Ok(())
    }
}

// ============================================================================
// Landing Config
// ============================================================================

/// Settings of the landing producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingConfig {
    /// Query endpoint of the financial API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as the `apikey` query parameter
    #[serde(default)]
    pub api_key: String,

    /// API function (e.g. `TIME_SERIES_DAILY`)
    #[serde(default = "default_function")]
    pub function: String,

    /// Ticker symbol
    #[serde(default)]
    pub symbol: String,

    /// Sampling interval, only sent when set
    #[serde(default)]
    pub interval: Option<String>,

    /// Container receiving raw responses
    #[serde(default)]
    pub bucket: String,

    /// Key prefix ("layer") of raw responses
    #[serde(default = "default_raw_layer")]
    pub layer_prefix: String,

    /// Filename suffix of raw responses
    #[serde(default = "default_raw_suffix")]
    pub raw_suffix_token: String,

    /// Seconds between two API calls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Total seconds the polling loop runs for
    #[serde(default = "default_run_for_secs")]
    pub run_for_secs: u64,
}

fn default_base_url() -> String {
    "https://www.alphavantage.co/query".to_string()
}

fn default_function() -> String {
    "TIME_SERIES_DAILY".to_string()
}

fn default_raw_layer() -> String {
    "raw".to_string()
}

fn default_poll_interval_secs() -> u64 {
    120
}

fn default_run_for_secs() -> u64 {
    600
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            function: default_function(),
            symbol: String::new(),
            interval: None,
            bucket: String::new(),
            layer_prefix: default_raw_layer(),
            raw_suffix_token: default_raw_suffix(),
            poll_interval_secs: default_poll_interval_secs(),
            run_for_secs: default_run_for_secs(),
        }
    }
}

impl LandingConfig {
    /// Delay between two API calls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Total duration of the polling loop
    pub fn run_for(&self) -> Duration {
        Duration::from_secs(self.run_for_secs)
    }

    /// Override from `API_KEY`, `FUNCTION`, `SYMBOL`, `INTERVAL` and `BUCKET_NAME`
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("API_KEY") {
            self.api_key = key;
        }
        if let Some(function) = lookup("FUNCTION") {
            self.function = function;
        }
        if let Some(symbol) = lookup("SYMBOL") {
            self.symbol = symbol;
        }
        if let Some(interval) = lookup("INTERVAL") {
            self.interval = Some(interval);
        }
        if let Some(bucket) = lookup("BUCKET_NAME") {
            self.bucket = bucket;
        }
    }

    /// Reject settings the producer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.symbol.is_empty() {
            return Err(Error::missing_field("symbol"));
        }
        if self.bucket.is_empty() {
            return Err(Error::missing_field("bucket"));
        }
        if self.poll_interval_secs == 0 {
            return Err(Error::config("poll_interval_secs must be greater than zero"));
        }
        Ok(())
    }
}
