// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// harvesting.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{rest_client, to_json, CommandResult};
use anyhow::Context;
use symbol_config::ToolkitConfig;
use symbol_core::PublicKey;
use symbol_rpc_client::{fetch_harvesting_status, StatisticsClient};
use tracing::info;

pub async fn execute(config: &ToolkitConfig, public_key: &str) -> CommandResult {
    let public_key: PublicKey = public_key
        .parse()
        .with_context(|| format!("invalid public key '{public_key}'"))?;

    let client = rest_client(config)?;
    let statistics = StatisticsClient::new(config.network.statistics_service_url.clone());
    let state = fetch_harvesting_status(&client, &statistics, &public_key).await?;
    info!(status = %state.status, "harvesting status resolved");
    to_json(&state)
}
