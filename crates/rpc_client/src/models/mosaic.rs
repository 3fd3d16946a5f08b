// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// mosaic.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::common::u64_from_any;
use serde::{Deserialize, Serialize};

/// Body of `POST /mosaics` and `POST /namespaces/mosaic/names`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicIdsRequest {
    pub mosaic_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MosaicInfoResponse {
    pub mosaic: MosaicInfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicInfoDto {
    pub id: String,
    #[serde(deserialize_with = "u64_from_any")]
    pub supply: u64,
    #[serde(deserialize_with = "u64_from_any")]
    pub start_height: u64,
    pub owner_address: String,
    pub flags: u8,
    pub divisibility: u8,
    #[serde(deserialize_with = "u64_from_any")]
    pub duration: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicNamesResponse {
    pub mosaic_names: Vec<MosaicNamesDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicNamesDto {
    pub mosaic_id: String,
    #[serde(default)]
    pub names: Vec<String>,
}
