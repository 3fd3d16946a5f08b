// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// statement.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::common::u64_from_any;
use serde::Deserialize;

/// Entry of `GET /statements/resolutions/address`
#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionStatementResponse {
    pub statement: ResolutionStatementDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionStatementDto {
    #[serde(deserialize_with = "u64_from_any")]
    pub height: u64,
    /// Unresolved address in raw hex
    pub unresolved: String,
    #[serde(default)]
    pub resolution_entries: Vec<ResolutionEntryDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionEntryDto {
    pub source: ResolutionSourceDto,
    /// Resolved address in raw hex
    pub resolved: String,
}

/// Position of the transaction that triggered a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionSourceDto {
    pub primary_id: u32,
    pub secondary_id: u32,
}
