//! Configuration for the default interceptor chain

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chain configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Service name, used as a metrics tag and log context field
    pub service_name: String,

    /// Log every consumed batch
    pub log_batches: bool,

    /// Drop records without a value before the application sees them
    pub drop_tombstones: bool,

    /// Count consumed records per topic
    pub count_records: bool,

    /// Headers stamped onto every consumed record
    pub common_headers: BTreeMap<String, String>,

    /// Priorities of the built-in interceptors
    pub priorities: PriorityConfig,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            service_name: "batch-interceptor".to_string(),
            log_batches: true,
            drop_tombstones: false,
            count_records: true,
            common_headers: BTreeMap::new(),
            priorities: PriorityConfig::default(),
        }
    }
}

/// Priorities of the built-in interceptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    /// Logging interceptor
    pub logging: i32,

    /// Header stamping interceptor
    pub headers: i32,

    /// Tombstone filter
    pub tombstones: i32,

    /// Record counter
    pub counting: i32,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            logging: -100, // see the raw batch
            headers: -50,
            tombstones: -10,
            counting: 100, // count what the application gets
        }
    }
}

impl ChainConfig {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = ChainConfig::default();

        if let Ok(name) = std::env::var("INTERCEPTOR_SERVICE_NAME") {
            config.service_name = name;
        }

        if let Some(flag) = env_flag("INTERCEPTOR_LOG_BATCHES")? {
            config.log_batches = flag;
        }

        if let Some(flag) = env_flag("INTERCEPTOR_DROP_TOMBSTONES")? {
            config.drop_tombstones = flag;
        }

        if let Some(flag) = env_flag("INTERCEPTOR_COUNT_RECORDS")? {
            config.count_records = flag;
        }

        Ok(config)
    }
}

fn env_flag(name: &str) -> crate::Result<Option<bool>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<bool>()
            .map(Some)
            .map_err(|_| {
                crate::Error::Config(format!("{} must be true or false, got {:?}", name, value))
            }),
        Err(_) => Ok(None),
    }
}
