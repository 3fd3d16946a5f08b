// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// namespace.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::common::opt_u64_from_any;
use serde::{Deserialize, Serialize};

/// Body of `POST /namespaces/names`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceIdsRequest {
    pub namespace_ids: Vec<String>,
}

/// One level of a namespace name
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceNameDto {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

/// `GET /namespaces/{namespaceId}`
#[derive(Debug, Clone, Deserialize)]
pub struct NamespaceInfoResponse {
    pub namespace: NamespaceInfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceInfoDto {
    pub registration_type: u8,
    pub depth: u8,
    pub owner_address: String,
    #[serde(default)]
    pub alias: AliasDto,
    #[serde(default, deserialize_with = "opt_u64_from_any")]
    pub start_height: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_from_any")]
    pub end_height: Option<u64>,
}

/// Namespace alias; `type` is 0 (none), 1 (mosaic) or 2 (address)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasDto {
    #[serde(rename = "type", default)]
    pub alias_type: u8,
    pub mosaic_id: Option<String>,
    pub address: Option<String>,
}

impl AliasDto {
    pub const NONE: u8 = 0;
    pub const MOSAIC: u8 = 1;
    pub const ADDRESS: u8 = 2;

    pub fn mosaic(&self) -> Option<&str> {
        (self.alias_type == Self::MOSAIC)
            .then_some(self.mosaic_id.as_deref())
            .flatten()
    }

    pub fn address(&self) -> Option<&str> {
        (self.alias_type == Self::ADDRESS)
            .then_some(self.address.as_deref())
            .flatten()
    }
}
