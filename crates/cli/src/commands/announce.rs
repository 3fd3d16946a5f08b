// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// announce.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{rest_client, to_json, CommandResult};
use anyhow::Context;
use serde_json::json;
use symbol_config::ToolkitConfig;
use symbol_core::SignedTransaction;
use symbol_rpc_client::{AnnounceGroup, Announcer};

pub async fn execute(config: &ToolkitConfig, payload: &str, hash: &str, group: AnnounceGroup) -> CommandResult {
    let transaction = SignedTransaction::from_hex(payload, hash).context("invalid signed transaction")?;
    let announcer = Announcer::new(rest_client(config)?, &config.network, &config.announce);
    let response = announcer.announce_transaction(&transaction, group).await?;
    to_json(&json!({
        "hash": transaction.hash(),
        "group": group.path(),
        "message": response.message,
    }))
}
