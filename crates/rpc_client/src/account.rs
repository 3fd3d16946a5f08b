// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// account.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Account-level queries built on the REST client, resolver and codec.

use crate::codec::{dto_to_domain, CodecConfig};
use crate::models::{MultisigDto, Page, Pagination, TransactionDto};
use crate::resolver::{self, extract_references, FieldMap, UnresolvedReferences};
use crate::rest_client::{RestClient, TransactionFilter};
use crate::{ProtocolError, Result};
use futures::future::try_join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use symbol_config::NetworkProperties;
use symbol_core::{
    sum_at_divisibility, Address, MosaicAmount, PublicKey, Transaction, TransactionGroup,
    TransactionMeta,
};
use tracing::{debug, warn};

/// Multisig settings of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigInfo {
    pub min_approval: u32,
    pub min_removal: u32,
    pub cosignatory_addresses: Vec<Address>,
    /// Accounts this account is a cosignatory of
    pub multisig_addresses: Vec<Address>,
}

impl MultisigInfo {
    fn from_dto(dto: &MultisigDto) -> Result<Self> {
        let parse = |addresses: &[String]| -> Result<Vec<Address>> {
            addresses
                .iter()
                .map(|address| Ok(Address::from_raw_hex(address)?))
                .collect()
        };
        Ok(Self {
            min_approval: dto.min_approval,
            min_removal: dto.min_removal,
            cosignatory_addresses: parse(&dto.cosignatory_addresses)?,
            multisig_addresses: parse(&dto.multisig_addresses)?,
        })
    }

    /// Whether the account is itself multisig, not merely a cosignatory
    pub fn is_multisig(&self) -> bool {
        !self.cosignatory_addresses.is_empty()
    }
}

/// Snapshot of an account assembled from several endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: Address,
    /// `None` until the account has signed a transaction
    pub public_key: Option<PublicKey>,
    pub importance: u64,
    /// Network currency balance
    pub balance: Decimal,
    pub mosaics: Vec<MosaicAmount>,
    /// `None` when the account takes no part in any multisig
    pub multisig: Option<MultisigInfo>,
    pub linked_public_key: Option<PublicKey>,
    pub node_public_key: Option<PublicKey>,
    pub vrf_public_key: Option<PublicKey>,
    /// Lookups that failed while the rest of the snapshot was still assembled
    pub failures: Vec<String>,
}

impl AccountInfo {
    fn empty(address: Address) -> Self {
        Self {
            address,
            public_key: None,
            importance: 0,
            balance: Decimal::ZERO,
            mosaics: Vec::new(),
            multisig: None,
            linked_public_key: None,
            node_public_key: None,
            vrf_public_key: None,
            failures: Vec::new(),
        }
    }
}

/// Fetches balances, keys and multisig settings of `address`.
///
/// Account and multisig lookups run concurrently. An unknown account yields
/// zero balances and a missing multisig entry means "not multisig". A failed
/// multisig lookup or mosaic resolution is recorded in
/// [`AccountInfo::failures`] without discarding the rest.
pub async fn fetch_account_info(
    client: &RestClient,
    properties: &NetworkProperties,
    address: &Address,
) -> Result<AccountInfo> {
    let plain = address.plain();
    let (account, multisig) = futures::join!(client.fetch_account(&plain), client.fetch_multisig(address));

    let mut info = AccountInfo::empty(*address);
    match multisig {
        Ok(Some(dto)) => info.multisig = Some(MultisigInfo::from_dto(&dto)?),
        Ok(None) => {}
        Err(error) => {
            warn!(address = %plain, %error, "multisig lookup failed");
            info.failures.push(format!("multisig: {error}"));
        }
    }

    let Some(account) = account? else {
        debug!(address = %plain, "unknown account, reporting zero balance");
        return Ok(info);
    };
    info.public_key = account.public_key();
    info.importance = account.importance;
    info.linked_public_key = account.supplemental_public_keys.linked();
    info.node_public_key = account.supplemental_public_keys.node();
    info.vrf_public_key = account.supplemental_public_keys.vrf();

    let holdings = account
        .mosaics
        .iter()
        .map(|mosaic| Ok((mosaic.mosaic_id()?, mosaic.amount)))
        .collect::<Result<Vec<_>>>()?;
    let references = UnresolvedReferences {
        mosaic_ids: holdings.iter().map(|(id, _)| *id).collect(),
        ..UnresolvedReferences::default()
    };
    let resolved = resolver::resolve(client, &references).await;
    info.failures.extend(resolved.failures().iter().cloned());

    let config = CodecConfig::new(properties, &resolved);
    info.mosaics = holdings
        .into_iter()
        .map(|(id, amount)| config.mosaic_amount(id, amount))
        .collect();
    info.balance = sum_at_divisibility(
        info.mosaics
            .iter()
            .filter(|mosaic| config.is_currency(&mosaic.id))
            .map(|mosaic| mosaic.amount),
        properties.network_currency.divisibility,
    );
    Ok(info)
}

/// One page of `address`'s transactions in `group`, decoded from the account's
/// point of view.
///
/// Aggregates are re-fetched individually so that their inner transactions
/// are included; references of the whole page are resolved in one pass.
pub async fn fetch_account_transactions(
    client: &RestClient,
    properties: &NetworkProperties,
    address: &Address,
    group: TransactionGroup,
    pagination: &Pagination,
) -> Result<Page<Transaction>> {
    if group == TransactionGroup::Failed {
        return Err(ProtocolError::UnsupportedGroup {
            group: group.to_string(),
        }
        .into());
    }

    let filter = TransactionFilter::for_address(*address);
    let page = client.search_transactions(group, &filter, pagination).await?;
    let dtos = try_join_all(page.data.into_iter().map(|dto| with_inner_transactions(client, group, dto))).await?;

    let references = extract_references(&dtos, &FieldMap::rest());
    debug!(
        transactions = dtos.len(),
        mosaics = references.mosaic_ids.len(),
        namespaces = references.namespace_ids.len(),
        aliases = references.addresses.len(),
        "resolving page references"
    );
    let resolved = resolver::resolve(client, &references).await;
    let config = CodecConfig::new(properties, &resolved).with_current_account(address);

    let data = dtos
        .iter()
        .map(|dto| {
            let mut transaction = dto_to_domain(dto, &config)?;
            transaction
                .meta
                .get_or_insert_with(TransactionMeta::default)
                .group = Some(group);
            Ok(transaction)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Page {
        data,
        pagination: page.pagination,
    })
}

async fn with_inner_transactions(
    client: &RestClient,
    group: TransactionGroup,
    dto: TransactionDto,
) -> Result<TransactionDto> {
    let is_aggregate = dto
        .transaction_type()
        .is_some_and(|kind| kind.is_aggregate());
    match dto.hash() {
        Some(hash) if is_aggregate && dto.transaction.transactions.is_empty() => {
            debug!(hash, "fetching aggregate with inner transactions");
            client.fetch_transaction(group, hash).await
        }
        _ => Ok(dto),
    }
}
