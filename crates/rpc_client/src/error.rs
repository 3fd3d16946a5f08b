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

//! Error types for node communication.

use std::fmt;
use symbol_core::CoreError;
use thiserror::Error;

/// Protocol-level errors: the node or the caller used the protocol in a way
/// this client does not support.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// WebSocket message for a channel this client does not know.
    #[error("Unsupported listener channel: {channel}")]
    UnsupportedChannel {
        /// Channel name taken from the message topic.
        channel: String,
    },

    /// Transaction group that cannot be used for the requested operation.
    #[error("Unsupported transaction group: {group}")]
    UnsupportedGroup {
        /// Group name.
        group: String,
    },

    /// A namespace alias had no resolution when decoding a transaction.
    #[error("Namespace alias {namespace_id} could not be resolved")]
    MissingNamespaceAlias {
        /// Namespace id in hex.
        namespace_id: String,
    },

    /// Listener operation attempted without an open connection.
    #[error("Listener is not connected")]
    NotConnected,

    /// WebSocket message that is not valid JSON or lacks required fields.
    #[error("Malformed listener message: {message}")]
    MalformedMessage {
        /// Error message.
        message: String,
    },
}

/// Failure of one node while racing an announcement.
#[derive(Debug, Clone)]
pub struct NodeFailure {
    /// Node the announcement was sent to.
    pub node: String,
    /// Failure reported by that node.
    pub error: String,
}

impl fmt::Display for NodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.node, self.error)
    }
}

/// Errors that can occur while talking to Symbol nodes.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Resource does not exist (HTTP 404).
    #[error("Not found: {resource}")]
    NotFound {
        /// Requested resource.
        resource: String,
    },

    /// Node answered with an error status.
    #[error("HTTP {status}: {code} {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// REST error code.
        code: String,
        /// REST error message.
        message: String,
    },

    /// Request could not be delivered.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// WebSocket failure.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] symbol_config::ConfigError),

    /// Core type error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// Transaction could not be converted between representations.
    #[error("Codec error: {message}")]
    Codec {
        /// Error message.
        message: String,
    },

    /// Protocol error.
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Every node rejected an announcement.
    #[error("All {} nodes rejected the announcement: {}", .failures.len(), join_failures(.failures))]
    AllNodesRejected {
        /// One entry per node that was tried.
        failures: Vec<NodeFailure>,
    },

    /// A bundle stage ended in a group other than `confirmed`.
    #[error("Bundle stage {index} ({hash}) ended in group {group}: {code}")]
    BundleStageFailed {
        /// Position of the stage in the bundle.
        index: usize,
        /// Transaction hash.
        hash: String,
        /// Terminal group reported by the node.
        group: String,
        /// Status code reported by the node.
        code: String,
    },

    /// Operation cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,

    /// WebSocket closed by the peer or the network.
    #[error("Connection closed ({code}): {reason}")]
    ConnectionClosed {
        /// Close code.
        code: u16,
        /// Close reason.
        reason: String,
    },
}

fn join_failures(failures: &[NodeFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ClientError {
    /// Create a not found error.
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an HTTP error.
    pub fn http<C: Into<String>, M: Into<String>>(status: u16, code: C, message: M) -> Self {
        Self::Http {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a codec error.
    pub fn codec<S: Into<String>>(message: S) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Whether the error is a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_resources_are_not_found() {
        assert!(ClientError::not_found("/accounts/TALICE").is_not_found());
        assert!(!ClientError::http(409, "InvalidArgument", "bad page").is_not_found());
        assert!(!ClientError::codec("short payload").is_not_found());
    }
}
