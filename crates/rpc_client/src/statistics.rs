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

//! Statistics-service client used to locate nodes by public key.

use crate::models::NodeStatisticsDto;
use crate::rest_client::create_api_url;
use crate::{ClientError, Result};
use reqwest::{Client, StatusCode};
use symbol_core::PublicKey;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct StatisticsClient {
    base_url: Url,
    http_client: Client,
}

impl StatisticsClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: Url) -> Self {
        Self {
            base_url,
            http_client,
        }
    }

    /// `GET {base}/nodes/{publicKey}`: node whose main account key is `public_key`
    pub async fn fetch_node_by_main_public_key(
        &self,
        public_key: &PublicKey,
    ) -> Result<Option<NodeStatisticsDto>> {
        self.fetch(&format!("nodes/{public_key}")).await
    }

    /// `GET {base}/nodes/nodePublicKey/{publicKey}`: node whose transport key is `public_key`
    pub async fn fetch_node_by_node_public_key(
        &self,
        public_key: &PublicKey,
    ) -> Result<Option<NodeStatisticsDto>> {
        self.fetch(&format!("nodes/nodePublicKey/{public_key}")).await
    }

    async fn fetch(&self, path: &str) -> Result<Option<NodeStatisticsDto>> {
        let url = create_api_url(&self.base_url, path, None, &[])?;
        debug!(%url, "statistics request");
        let response = self.http_client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(ClientError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                format!("statistics service request {path} failed"),
            )),
        }
    }
}
