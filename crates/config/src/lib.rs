// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// lib.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Symbol Configuration Module
//!
//! This module provides the network properties consumed by every component of
//! the toolkit, plus the TOML configuration file used by the command-line front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod properties;
mod toolkit;

pub use properties::{CurrencyInfo, NetworkProperties};
pub use toolkit::{AnnounceConfig, LogFormat, LoggingConfig, ToolkitConfig};

/// Size of a decoded address in bytes
pub const ADDRESS_SIZE: usize = 24;
/// Size of a public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;
/// Number of other nodes an announcement is broadcast to besides the configured node
pub const DEFAULT_ANNOUNCE_EXTRA_NODES: usize = 3;
/// Interval between transaction status polls while a bundle stage awaits confirmation
pub const DEFAULT_STATUS_POLL_INTERVAL_MS: u64 = 1_000;
/// Maximum page size accepted by REST list endpoints
pub const MAX_PAGE_SIZE: u32 = 100;
/// Default REST gateway port of a Symbol API node
pub const DEFAULT_REST_PORT: u16 = 3001;

/// Symbol MainNet API nodes
pub const MAINNET_NODES: &[&str] = &[
    "https://ngl-dual-001.symbolblockchain.io:3001",
    "https://ngl-dual-101.symbolblockchain.io:3001",
    "https://ngl-dual-201.symbolblockchain.io:3001",
    "https://ngl-dual-301.symbolblockchain.io:3001",
    "https://ngl-dual-401.symbolblockchain.io:3001",
];

/// Symbol TestNet API nodes
pub const TESTNET_NODES: &[&str] = &[
    "https://001-sai-dual.symboltest.net:3001",
    "https://201-sai-dual.symboltest.net:3001",
    "https://401-sai-dual.symboltest.net:3001",
];

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unknown network type: {0}")]
    UnknownNetwork(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Network type of a Symbol chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    MainNet,
    TestNet,
}

impl NetworkType {
    /// Gets the network identifier byte (first byte of every address)
    pub fn identifier(&self) -> u8 {
        match self {
            NetworkType::MainNet => 0x68,
            NetworkType::TestNet => 0x98,
        }
    }

    /// Resolves a network type from an address identifier byte
    pub fn from_identifier(identifier: u8) -> Option<Self> {
        match identifier {
            0x68 => Some(NetworkType::MainNet),
            0x98 => Some(NetworkType::TestNet),
            _ => None,
        }
    }

    /// Gets the nemesis epoch adjustment in seconds
    pub fn epoch_adjustment(&self) -> u64 {
        match self {
            NetworkType::MainNet => 1_615_853_185,
            NetworkType::TestNet => 1_667_250_467,
        }
    }

    /// Gets the nemesis generation hash seed
    pub fn generation_hash(&self) -> &'static str {
        match self {
            NetworkType::MainNet => {
                "57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6"
            }
            NetworkType::TestNet => {
                "49D6E1CE276A85B70EAFE52349AACCA389302E7A9754BCF1221E79494FC665A4"
            }
        }
    }

    /// Gets the network currency mosaic id (hex)
    pub fn currency_mosaic_id(&self) -> &'static str {
        match self {
            NetworkType::MainNet => "6BED913FA20223F8",
            NetworkType::TestNet => "72C0212E67A08BCE",
        }
    }

    /// Gets the statistics service endpoint
    pub fn statistics_service_url(&self) -> &'static str {
        match self {
            NetworkType::MainNet => "https://symbol.services",
            NetworkType::TestNet => "https://testnet.symbol.services",
        }
    }

    /// Gets the well-known API nodes
    pub fn default_nodes(&self) -> &'static [&'static str] {
        match self {
            NetworkType::MainNet => MAINNET_NODES,
            NetworkType::TestNet => TESTNET_NODES,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::MainNet => write!(f, "mainnet"),
            NetworkType::TestNet => write!(f, "testnet"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "104" => Ok(NetworkType::MainNet),
            "testnet" | "test" | "152" => Ok(NetworkType::TestNet),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_type_parses_names_and_identifiers() {
        assert_eq!("mainnet".parse::<NetworkType>().unwrap(), NetworkType::MainNet);
        assert_eq!("TestNet".parse::<NetworkType>().unwrap(), NetworkType::TestNet);
        assert_eq!("152".parse::<NetworkType>().unwrap(), NetworkType::TestNet);
        assert!("privnet".parse::<NetworkType>().is_err());
    }

    #[test]
    fn identifier_round_trips() {
        for network in [NetworkType::MainNet, NetworkType::TestNet] {
            assert_eq!(NetworkType::from_identifier(network.identifier()), Some(network));
        }
        assert_eq!(NetworkType::from_identifier(0x00), None);
    }
}
