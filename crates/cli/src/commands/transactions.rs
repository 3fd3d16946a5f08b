// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// transactions.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{parse_address, rest_client, to_json, CommandResult};
use symbol_config::ToolkitConfig;
use symbol_core::TransactionGroup;
use symbol_rpc_client::models::Pagination;
use symbol_rpc_client::fetch_account_transactions;
use tracing::info;

pub async fn execute(
    config: &ToolkitConfig,
    address: &str,
    group: TransactionGroup,
    page: u32,
    page_size: u32,
) -> CommandResult {
    let address = parse_address(address)?;
    let client = rest_client(config)?;
    let pagination = Pagination::new(page, page_size);

    info!(address = %address, group = %group, page, "fetching account transactions");
    let page = fetch_account_transactions(&client, &config.network, &address, group, &pagination).await?;
    info!(count = page.data.len(), "transactions decoded");
    to_json(&page.data)
}
