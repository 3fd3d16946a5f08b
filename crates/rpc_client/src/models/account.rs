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

use super::common::u64_from_any;
use serde::Deserialize;
use symbol_core::{PublicKey, Result as CoreResult, UnresolvedMosaicId};

/// `GET /accounts/{accountId}`
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub account: AccountDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    /// Address in raw hex
    pub address: String,
    pub public_key: String,
    #[serde(default)]
    pub supplemental_public_keys: SupplementalPublicKeysDto,
    #[serde(default)]
    pub mosaics: Vec<MosaicDto>,
    #[serde(default, deserialize_with = "u64_from_any")]
    pub importance: u64,
}

impl AccountDto {
    /// Public key, `None` while the account has never signed
    pub fn public_key(&self) -> Option<PublicKey> {
        self.public_key
            .parse::<PublicKey>()
            .ok()
            .filter(|key| !key.is_zero())
    }
}

/// Keys linked for remote harvesting and voting
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplementalPublicKeysDto {
    pub linked: Option<LinkedKeyDto>,
    pub node: Option<LinkedKeyDto>,
    pub vrf: Option<LinkedKeyDto>,
}

impl SupplementalPublicKeysDto {
    pub fn linked(&self) -> Option<PublicKey> {
        parse_key(&self.linked)
    }

    pub fn node(&self) -> Option<PublicKey> {
        parse_key(&self.node)
    }

    pub fn vrf(&self) -> Option<PublicKey> {
        parse_key(&self.vrf)
    }

    /// Whether linked, node and VRF keys are all present
    pub fn all_linked(&self) -> bool {
        self.linked().is_some() && self.node().is_some() && self.vrf().is_some()
    }
}

fn parse_key(key: &Option<LinkedKeyDto>) -> Option<PublicKey> {
    key.as_ref()
        .and_then(|key| key.public_key.parse::<PublicKey>().ok())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedKeyDto {
    pub public_key: String,
}

/// Mosaic quantity as REST reports it
#[derive(Debug, Clone, Deserialize)]
pub struct MosaicDto {
    pub id: String,
    #[serde(deserialize_with = "u64_from_any")]
    pub amount: u64,
}

impl MosaicDto {
    pub fn mosaic_id(&self) -> CoreResult<UnresolvedMosaicId> {
        self.id.parse()
    }
}

/// `GET /account/{address}/multisig`
#[derive(Debug, Clone, Deserialize)]
pub struct MultisigResponse {
    pub multisig: MultisigDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigDto {
    pub account_address: String,
    pub min_approval: u32,
    pub min_removal: u32,
    #[serde(default)]
    pub cosignatory_addresses: Vec<String>,
    #[serde(default)]
    pub multisig_addresses: Vec<String>,
}
