// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// statistics.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::Deserialize;
use symbol_config::DEFAULT_REST_PORT;
use url::Url;

/// Node entry of the statistics service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatisticsDto {
    pub public_key: String,
    pub host: String,
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default)]
    pub roles: u32,
    pub api_status: Option<ApiStatusDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatusDto {
    pub rest_gateway_url: Option<String>,
    #[serde(default)]
    pub is_available: bool,
    pub node_public_key: Option<String>,
}

impl NodeStatisticsDto {
    /// REST gateway of the node, falling back to `https://{host}:3001`
    pub fn gateway_url(&self) -> Option<Url> {
        self.api_status
            .as_ref()
            .and_then(|status| status.rest_gateway_url.as_deref())
            .and_then(|url| Url::parse(url).ok())
            .or_else(|| Url::parse(&format!("https://{}:{}", self.host, DEFAULT_REST_PORT)).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gateway_prefers_api_status() {
        let node: NodeStatisticsDto = serde_json::from_value(json!({
            "publicKey": "AA",
            "host": "node.example",
            "apiStatus": {"restGatewayUrl": "http://node.example:3000", "isAvailable": true}
        }))
        .unwrap();
        assert_eq!(node.gateway_url().unwrap().as_str(), "http://node.example:3000/");

        let bare: NodeStatisticsDto =
            serde_json::from_value(json!({"publicKey": "AA", "host": "node.example"})).unwrap();
        assert_eq!(bare.gateway_url().unwrap().as_str(), "https://node.example:3001/");
    }
}
