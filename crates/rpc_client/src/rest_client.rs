// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// rest_client.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! REST gateway client.
//!
//! One method per endpoint; responses are returned as DTOs from [`crate::models`].
//! Lookups of a single resource that may legitimately be missing return
//! `Ok(None)` on 404 instead of an error.

use crate::models::common::ErrorBody;
use crate::models::{
    AccountDto, AccountResponse, AnnounceRequest, AnnounceResponse, ChainInfoDto, MosaicIdsRequest,
    MosaicInfoDto, MosaicInfoResponse, MosaicNamesDto, MosaicNamesResponse, MultisigDto,
    MultisigResponse, NamespaceIdsRequest, NamespaceInfoDto, NamespaceInfoResponse,
    NamespaceNameDto, NetworkConfigurationDto, NodeInfoDto, Page, Pagination,
    ResolutionStatementDto, ResolutionStatementResponse, TransactionDto, TransactionStatusDto,
    UnlockedAccountsDto,
};
use crate::{ClientError, ProtocolError, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use symbol_config::{CurrencyInfo, NetworkProperties, NetworkType};
use symbol_core::{
    Address, MosaicId, NamespaceId, PublicKey, SignedTransaction, TransactionGroup, TransactionType,
};
use tracing::{debug, warn};
use url::Url;

/// Default timeout applied to every REST request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds `{base}/{path}?pageNumber=..&pageSize=..&order=..&{filters}`.
///
/// Pagination parameters always precede the endpoint-specific filters.
pub fn create_api_url(
    base: &Url,
    path: &str,
    pagination: Option<&Pagination>,
    filters: &[(&str, String)],
) -> Result<Url> {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url.set_query(None);

    if pagination.is_some() || !filters.is_empty() {
        let mut query = url.query_pairs_mut();
        if let Some(pagination) = pagination {
            for (name, value) in pagination.query_pairs() {
                query.append_pair(name, &value);
            }
        }
        for (name, value) in filters {
            query.append_pair(name, value);
        }
    }

    Ok(url)
}

/// Filters of `GET /transactions/{group}`
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub address: Option<Address>,
    pub recipient_address: Option<Address>,
    pub signer_public_key: Option<PublicKey>,
    pub height: Option<u64>,
    pub from_height: Option<u64>,
    pub to_height: Option<u64>,
    pub types: Vec<TransactionType>,
    /// Include transactions embedded in aggregates
    pub embedded: bool,
}

impl TransactionFilter {
    pub fn for_address(address: Address) -> Self {
        Self {
            address: Some(address),
            ..Self::default()
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(address) = &self.address {
            pairs.push(("address", address.plain()));
        }
        if let Some(recipient) = &self.recipient_address {
            pairs.push(("recipientAddress", recipient.plain()));
        }
        if let Some(signer) = &self.signer_public_key {
            pairs.push(("signerPublicKey", signer.to_hex()));
        }
        if let Some(height) = self.height {
            pairs.push(("height", height.to_string()));
        }
        if let Some(height) = self.from_height {
            pairs.push(("fromHeight", height.to_string()));
        }
        if let Some(height) = self.to_height {
            pairs.push(("toHeight", height.to_string()));
        }
        for kind in &self.types {
            pairs.push(("type", kind.code().to_string()));
        }
        if self.embedded {
            pairs.push(("embedded", "true".to_string()));
        }
        pairs
    }
}

/// Group an announcement is pushed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnounceGroup {
    /// `PUT /transactions`
    #[default]
    Default,
    /// `PUT /transactions/partial`, for bonded aggregates awaiting cosignatures
    Partial,
}

impl AnnounceGroup {
    pub fn path(&self) -> &'static str {
        match self {
            AnnounceGroup::Default => "transactions",
            AnnounceGroup::Partial => "transactions/partial",
        }
    }
}

impl std::str::FromStr for AnnounceGroup {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(AnnounceGroup::Default),
            "partial" => Ok(AnnounceGroup::Partial),
            other => Err(ProtocolError::UnsupportedGroup {
                group: other.to_string(),
            }
            .into()),
        }
    }
}

/// Client for one REST gateway
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: Url,
    http_client: Client,
}

impl RestClient {
    /// Creates a client with its own HTTP connection pool
    pub fn new(base_url: Url) -> Result<Self> {
        let http_client = Client::builder().timeout(DEFAULT_HTTP_TIMEOUT).build()?;
        Ok(Self::with_client(http_client, base_url))
    }

    /// Creates a client sharing an existing HTTP connection pool
    pub fn with_client(http_client: Client, base_url: Url) -> Self {
        Self {
            base_url,
            http_client,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client for another node sharing this client's connection pool
    pub fn for_node(&self, base_url: Url) -> Self {
        Self::with_client(self.http_client.clone(), base_url)
    }

    fn url(&self, path: &str) -> Result<Url> {
        create_api_url(&self.base_url, path, None, &[])
    }

    async fn send<B: Serialize>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Response> {
        debug!(%method, %url, "REST request");
        let mut request = self.http_client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        debug!(%method, %url, status = %response.status(), "REST response");
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(resource: &str, response: Response) -> Result<T> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(resource));
        }
        let body = response.text().await?;
        if !status.is_success() {
            let error: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            warn!(resource, status = status.as_u16(), code = %error.code, "REST error response");
            return Err(ClientError::http(status.as_u16(), error.code, error.message));
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let resource = url.path().to_string();
        let response = self.send::<()>(Method::GET, url, None).await?;
        Self::decode(&resource, response).await
    }

    async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        match self.get(url).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path)?;
        let response = self.send(method, url, Some(body)).await?;
        Self::decode(path, response).await
    }

    // Accounts

    /// `GET /accounts/{address or public key}`, `None` for unknown accounts
    pub async fn fetch_account(&self, account_id: &str) -> Result<Option<AccountDto>> {
        let url = self.url(&format!("accounts/{account_id}"))?;
        Ok(self
            .get_optional::<AccountResponse>(url)
            .await?
            .map(|response| response.account))
    }

    /// `GET /account/{address}/multisig`, `None` when the account is not multisig
    pub async fn fetch_multisig(&self, address: &Address) -> Result<Option<MultisigDto>> {
        let url = self.url(&format!("account/{}/multisig", address.plain()))?;
        Ok(self
            .get_optional::<MultisigResponse>(url)
            .await?
            .map(|response| response.multisig))
    }

    // Mosaics and namespaces

    /// `POST /mosaics`
    pub async fn fetch_mosaic_infos(&self, ids: &[MosaicId]) -> Result<Vec<MosaicInfoDto>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let request = MosaicIdsRequest {
            mosaic_ids: ids.iter().map(MosaicId::to_hex).collect(),
        };
        let infos: Vec<MosaicInfoResponse> = self.send_json(Method::POST, "mosaics", &request).await?;
        Ok(infos.into_iter().map(|info| info.mosaic).collect())
    }

    /// `GET /mosaics/{id}`
    pub async fn fetch_mosaic_info(&self, id: MosaicId) -> Result<Option<MosaicInfoDto>> {
        let url = self.url(&format!("mosaics/{id}"))?;
        Ok(self
            .get_optional::<MosaicInfoResponse>(url)
            .await?
            .map(|info| info.mosaic))
    }

    /// `POST /namespaces/mosaic/names`
    pub async fn fetch_mosaic_names(&self, ids: &[MosaicId]) -> Result<Vec<MosaicNamesDto>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let request = MosaicIdsRequest {
            mosaic_ids: ids.iter().map(MosaicId::to_hex).collect(),
        };
        let names: MosaicNamesResponse = self
            .send_json(Method::POST, "namespaces/mosaic/names", &request)
            .await?;
        Ok(names.mosaic_names)
    }

    /// `POST /namespaces/names`; returns one entry per requested level
    pub async fn fetch_namespace_names(&self, ids: &[NamespaceId]) -> Result<Vec<NamespaceNameDto>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let request = NamespaceIdsRequest {
            namespace_ids: ids.iter().map(NamespaceId::to_hex).collect(),
        };
        self.send_json(Method::POST, "namespaces/names", &request).await
    }

    /// `GET /namespaces/{id}`, `None` for unknown namespaces
    pub async fn fetch_namespace(&self, id: NamespaceId) -> Result<Option<NamespaceInfoDto>> {
        let url = self.url(&format!("namespaces/{id}"))?;
        Ok(self
            .get_optional::<NamespaceInfoResponse>(url)
            .await?
            .map(|info| info.namespace))
    }

    // Receipts

    /// `GET /statements/resolutions/address` for one block, every page.
    ///
    /// Pages are read until one comes back shorter than the page size.
    pub async fn fetch_address_resolutions(&self, height: u64) -> Result<Vec<ResolutionStatementDto>> {
        let mut statements = Vec::new();
        let mut pagination = Pagination::new(1, symbol_config::MAX_PAGE_SIZE);
        loop {
            let url = create_api_url(
                &self.base_url,
                "statements/resolutions/address",
                Some(&pagination),
                &[("height", height.to_string())],
            )?;
            let page: Page<ResolutionStatementResponse> = self.get(url).await?;
            let last = page.data.len() < pagination.page_size as usize;
            statements.extend(page.data.into_iter().map(|entry| entry.statement));
            if last || pagination.page_number == u32::MAX {
                break;
            }
            pagination.page_number += 1;
        }
        debug!(height, count = statements.len(), "address resolutions fetched");
        Ok(statements)
    }

    // Transactions

    /// `GET /transactions/{group}`
    pub async fn search_transactions(
        &self,
        group: TransactionGroup,
        filter: &TransactionFilter,
        pagination: &Pagination,
    ) -> Result<Page<TransactionDto>> {
        let url = create_api_url(
            &self.base_url,
            &format!("transactions/{group}"),
            Some(pagination),
            &filter.query_pairs(),
        )?;
        self.get(url).await
    }

    /// `GET /transactions/{group}/{hash}`
    pub async fn fetch_transaction(&self, group: TransactionGroup, hash: &str) -> Result<TransactionDto> {
        let url = self.url(&format!("transactions/{group}/{hash}"))?;
        self.get(url).await
    }

    /// `GET /transactionStatus/{hash}`, `None` while the node does not know the hash
    pub async fn fetch_transaction_status(&self, hash: &str) -> Result<Option<TransactionStatusDto>> {
        let url = self.url(&format!("transactionStatus/{hash}"))?;
        self.get_optional(url).await
    }

    /// `PUT /transactions` or `PUT /transactions/partial`
    pub async fn announce(
        &self,
        group: AnnounceGroup,
        transaction: &SignedTransaction,
    ) -> Result<AnnounceResponse> {
        let request = AnnounceRequest {
            payload: transaction.payload_hex(),
        };
        self.send_json(Method::PUT, group.path(), &request).await
    }

    // Network and node

    /// `GET /chain/info`
    pub async fn fetch_chain_info(&self) -> Result<ChainInfoDto> {
        self.get(self.url("chain/info")?).await
    }

    /// `GET /node/info`
    pub async fn fetch_node_info(&self) -> Result<NodeInfoDto> {
        self.get(self.url("node/info")?).await
    }

    /// `GET /node/unlockedaccount`
    pub async fn fetch_unlocked_accounts(&self) -> Result<Vec<String>> {
        let accounts: UnlockedAccountsDto = self.get(self.url("node/unlockedaccount")?).await?;
        Ok(accounts.unlocked_account)
    }

    /// Assembles [`NetworkProperties`] from `/network/properties` and the currency mosaic
    pub async fn fetch_network_properties(&self) -> Result<NetworkProperties> {
        let config: NetworkConfigurationDto = self.get(self.url("network/properties")?).await?;
        let network_type: NetworkType = config.network.identifier.parse()?;
        let currency_id: MosaicId = config.chain.currency_mosaic_id.parse()?;

        let currency_ids = [currency_id];
        let (info, names) = futures::join!(
            self.fetch_mosaic_info(currency_id),
            self.fetch_mosaic_names(&currency_ids)
        );
        let info = info?.ok_or_else(|| ClientError::not_found(format!("mosaics/{currency_id}")))?;
        let namespace_name = names?
            .into_iter()
            .find_map(|entry| entry.names.into_iter().next())
            .unwrap_or_default();

        let mut properties = NetworkProperties::for_network(network_type, self.base_url.clone())?;
        properties.generation_hash = config.network.generation_hash_seed.clone();
        if let Some(epoch) = config.network.epoch_adjustment_seconds() {
            properties.epoch_adjustment = epoch;
        }
        properties.network_currency = CurrencyInfo {
            mosaic_id: currency_id.to_hex(),
            namespace_name,
            divisibility: info.divisibility,
        };
        debug!(network = %network_type, currency = %currency_id, "fetched network properties");
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_puts_pagination_before_filters() {
        let base = Url::parse("https://node.example:3001").unwrap();
        let url = create_api_url(
            &base,
            "/transactions/confirmed",
            Some(&Pagination::new(2, 50)),
            &[("address", "TALICE".to_string()), ("embedded", "true".to_string())],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://node.example:3001/transactions/confirmed?pageNumber=2&pageSize=50&order=desc&address=TALICE&embedded=true"
        );
    }

    #[test]
    fn api_url_keeps_base_path() {
        let base = Url::parse("http://proxy.example/symbol/").unwrap();
        let url = create_api_url(&base, "chain/info", None, &[]).unwrap();
        assert_eq!(url.as_str(), "http://proxy.example/symbol/chain/info");
    }

    #[test]
    fn announce_groups_parse() {
        assert_eq!("partial".parse::<AnnounceGroup>().unwrap(), AnnounceGroup::Partial);
        assert!(matches!(
            "confirmed".parse::<AnnounceGroup>(),
            Err(ClientError::Protocol(ProtocolError::UnsupportedGroup { .. }))
        ));
    }
}
