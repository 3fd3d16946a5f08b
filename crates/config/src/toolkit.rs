// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// toolkit.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::{
    ConfigError, NetworkProperties, NetworkType, Result, DEFAULT_ANNOUNCE_EXTRA_NODES,
    DEFAULT_STATUS_POLL_INTERVAL_MS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Complete toolkit configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Network properties
    pub network: NetworkProperties,
    /// Announcement workflow settings
    #[serde(default)]
    pub announce: AnnounceConfig,
    /// Logger configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Announcement workflow settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnounceConfig {
    /// Number of randomly sampled known nodes raced alongside the configured node
    pub extra_nodes: usize,
    /// Delay between transaction status polls in milliseconds
    pub poll_interval_ms: u64,
}

impl AnnounceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for AnnounceConfig {
    fn default() -> Self {
        Self {
            extra_nodes: DEFAULT_ANNOUNCE_EXTRA_NODES,
            poll_interval_ms: DEFAULT_STATUS_POLL_INTERVAL_MS,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter directive (trace, debug, info, warn, error or an env-filter expression)
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl ToolkitConfig {
    /// Creates a configuration targeting the first well-known node of a network
    pub fn for_network(network_type: NetworkType) -> Result<Self> {
        let node = network_type
            .default_nodes()
            .first()
            .ok_or_else(|| ConfigError::Invalid(format!("no default nodes for {network_type}")))?;
        Ok(Self {
            network: NetworkProperties::for_network(network_type, Url::parse(node)?)?,
            announce: AnnounceConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// Loads the configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), node = %config.network.node_url, "loaded toolkit configuration");
        Ok(config)
    }

    /// Parses the configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.network.network_currency.divisibility > 18 {
            return Err(ConfigError::Invalid(format!(
                "currency divisibility {} out of range",
                self.network.network_currency.divisibility
            )));
        }
        if self.announce.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "announce.poll_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
