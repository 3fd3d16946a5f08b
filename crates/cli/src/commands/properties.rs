// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// properties.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{rest_client, to_json, CommandResult};
use symbol_config::ToolkitConfig;
use tracing::info;

pub async fn execute(config: &ToolkitConfig) -> CommandResult {
    let client = rest_client(config)?;
    let properties = client.fetch_network_properties().await?;
    info!(
        network = %properties.network_type,
        currency = %properties.network_currency.namespace_name,
        "network properties fetched"
    );
    to_json(&properties)
}
