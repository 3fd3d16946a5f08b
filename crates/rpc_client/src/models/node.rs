// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// node.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::Deserialize;

/// `GET /node/info`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfoDto {
    pub version: u32,
    pub public_key: String,
    pub network_generation_hash_seed: String,
    pub roles: u32,
    pub port: u16,
    pub network_identifier: u8,
    pub host: String,
    #[serde(default)]
    pub friendly_name: String,
    pub node_public_key: Option<String>,
}

/// `GET /node/unlockedaccount`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAccountsDto {
    #[serde(default)]
    pub unlocked_account: Vec<String>,
}
