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

use super::{parse_address, rest_client, to_json, CommandResult};
use symbol_config::ToolkitConfig;
use symbol_rpc_client::fetch_account_info;
use tracing::{info, warn};

pub async fn execute(config: &ToolkitConfig, address: &str) -> CommandResult {
    let address = parse_address(address)?;
    let client = rest_client(config)?;

    info!(address = %address, "fetching account information");
    let info = fetch_account_info(&client, &config.network, &address).await?;
    for failure in &info.failures {
        warn!(%failure, "account information is partial");
    }
    to_json(&info)
}
