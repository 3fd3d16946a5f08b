// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// error.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use thiserror::Error;

/// Core errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Address could not be decoded or failed its checksum
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Public key has the wrong length or encoding
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Hex string could not be decoded
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Mosaic or namespace id could not be parsed
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Amount does not fit the absolute representation
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    /// Numeric value outside of an enumeration
    #[error("Unknown {kind} value: {value}")]
    UnknownEnumValue {
        /// Enumeration name
        kind: &'static str,
        /// Offending value
        value: String,
    },

    /// External SDK failure
    #[error("SDK error: {0}")]
    Sdk(String),
}

impl CoreError {
    /// Create an unknown enum value error.
    pub fn unknown_value<V: ToString>(kind: &'static str, value: V) -> Self {
        Self::UnknownEnumValue {
            kind,
            value: value.to_string(),
        }
    }
}

impl From<hex::FromHexError> for CoreError {
    fn from(err: hex::FromHexError) -> Self {
        CoreError::InvalidHex(err.to_string())
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
