// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// properties.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::{ConfigError, NetworkType, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Network currency description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// Mosaic id in 16-character hex
    pub mosaic_id: String,
    /// Namespace alias of the currency (e.g. `symbol.xym`)
    pub namespace_name: String,
    /// Number of decimal places
    pub divisibility: u8,
}

/// Read-only properties of the network the toolkit talks to.
///
/// Every component (resolver, codec, listener, announcement workflow and
/// harvesting resolver) receives these by reference; nothing mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkProperties {
    /// REST gateway of the node used for reads and as the primary announce target
    pub node_url: Url,
    pub network_type: NetworkType,
    pub generation_hash: String,
    /// Seconds between the unix epoch and the nemesis block
    pub epoch_adjustment: u64,
    pub network_currency: CurrencyInfo,
    /// Other nodes announcements may be broadcast to
    #[serde(default)]
    pub known_nodes: Vec<Url>,
    pub statistics_service_url: Url,
}

impl NetworkProperties {
    /// Creates properties for a network using its well-known defaults
    pub fn for_network(network_type: NetworkType, node_url: Url) -> Result<Self> {
        let known_nodes = network_type
            .default_nodes()
            .iter()
            .map(|node| Url::parse(node))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            node_url,
            network_type,
            generation_hash: network_type.generation_hash().to_string(),
            epoch_adjustment: network_type.epoch_adjustment(),
            network_currency: CurrencyInfo {
                mosaic_id: network_type.currency_mosaic_id().to_string(),
                namespace_name: "symbol.xym".to_string(),
                divisibility: 6,
            },
            known_nodes,
            statistics_service_url: Url::parse(network_type.statistics_service_url())?,
        })
    }

    /// WebSocket endpoint of the configured node: scheme swapped to ws/wss, `/ws` appended
    pub fn websocket_url(&self) -> Result<Url> {
        websocket_url(&self.node_url)
    }

    /// Known nodes excluding the configured node itself
    pub fn other_nodes(&self) -> impl Iterator<Item = &Url> {
        self.known_nodes
            .iter()
            .filter(move |node| !same_origin(node, &self.node_url))
    }
}

/// Derives the WebSocket endpoint of a REST gateway URL
pub fn websocket_url(node_url: &Url) -> Result<Url> {
    let mut url = node_url.clone();
    let scheme = match node_url.scheme() {
        "https" => "wss",
        "http" => "ws",
        other => {
            return Err(ConfigError::Invalid(format!(
                "unsupported node URL scheme '{other}'"
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| ConfigError::Invalid(format!("cannot derive websocket URL from {node_url}")))?;

    let path = format!("{}/ws", node_url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    Ok(url)
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mainnet() -> NetworkProperties {
        let node = Url::parse("https://ngl-dual-001.symbolblockchain.io:3001").unwrap();
        NetworkProperties::for_network(NetworkType::MainNet, node).unwrap()
    }

    #[test]
    fn websocket_url_swaps_scheme_and_appends_path() {
        let url = websocket_url(&Url::parse("http://localhost:3000").unwrap()).unwrap();
        assert_eq!(url.as_str(), "ws://localhost:3000/ws");

        let url = websocket_url(&Url::parse("https://node.example:3001/api/").unwrap()).unwrap();
        assert_eq!(url.as_str(), "wss://node.example:3001/api/ws");
    }

    #[test]
    fn other_nodes_excludes_configured_node() {
        let properties = mainnet();
        assert_eq!(properties.known_nodes.len(), 5);
        assert_eq!(properties.other_nodes().count(), 4);
        assert!(properties
            .other_nodes()
            .all(|node| node.host_str() != properties.node_url.host_str()));
    }

    #[test]
    fn defaults_follow_network() {
        let properties = mainnet();
        assert_eq!(properties.epoch_adjustment, 1_615_853_185);
        assert_eq!(properties.network_currency.mosaic_id, "6BED913FA20223F8");
        assert_eq!(properties.network_currency.divisibility, 6);
    }
}
