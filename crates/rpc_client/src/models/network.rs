// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// network.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::common::u64_from_any;
use serde::Deserialize;

/// `GET /network/properties`, reduced to the values this client needs
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfigurationDto {
    pub network: NetworkSectionDto,
    pub chain: ChainSectionDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSectionDto {
    pub identifier: String,
    pub generation_hash_seed: String,
    /// Seconds with an `s` suffix, e.g. `1667250467s`
    pub epoch_adjustment: String,
}

impl NetworkSectionDto {
    pub fn epoch_adjustment_seconds(&self) -> Option<u64> {
        self.epoch_adjustment.trim_end_matches('s').parse().ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSectionDto {
    /// Hex id with `0x` prefix and `'` separators
    pub currency_mosaic_id: String,
}

/// `GET /chain/info`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfoDto {
    #[serde(deserialize_with = "u64_from_any")]
    pub height: u64,
    pub latest_finalized_block: FinalizedBlockDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedBlockDto {
    pub finalization_epoch: u32,
    pub finalization_point: u32,
    #[serde(deserialize_with = "u64_from_any")]
    pub height: u64,
    pub hash: String,
}
