// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// mod.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Subcommand implementations.

pub mod account;
pub mod announce;
pub mod harvesting;
pub mod listen;
pub mod properties;
pub mod transactions;

use crate::args::Command;
use anyhow::{Context, Result};
use serde::Serialize;
use symbol_config::ToolkitConfig;
use symbol_core::Address;
use symbol_rpc_client::RestClient;

/// Output of a finished command, printed by the binary
pub type CommandResult = Result<String>;

/// Runs `command` against the configured node
pub async fn execute(command: Command, config: &ToolkitConfig) -> CommandResult {
    match command {
        Command::Transactions {
            address,
            group,
            page,
            page_size,
        } => transactions::execute(config, &address, group.into(), page, page_size).await,
        Command::Account { address } => account::execute(config, &address).await,
        Command::Harvesting { public_key } => harvesting::execute(config, &public_key).await,
        Command::Listen { address } => listen::execute(config, &address).await,
        Command::Announce { payload, hash, group } => {
            announce::execute(config, &payload, &hash, group.into()).await
        }
        Command::Properties => properties::execute(config).await,
    }
}

/// Parses a plain or raw hex address
pub fn parse_address(text: &str) -> Result<Address> {
    text.parse::<Address>()
        .with_context(|| format!("invalid address '{text}'"))
}

pub(crate) fn rest_client(config: &ToolkitConfig) -> Result<RestClient> {
    RestClient::new(config.network.node_url.clone()).context("failed to create REST client")
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> CommandResult {
    serde_json::to_string_pretty(value).context("failed to render output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbol_core::{NetworkType, PublicKey};

    #[test]
    fn address_accepts_both_forms() {
        let address = Address::from_public_key(&PublicKey::from_bytes([9; 32]), NetworkType::TestNet);
        assert_eq!(parse_address(&address.plain()).unwrap(), address);
        assert_eq!(parse_address(&address.to_raw_hex()).unwrap(), address);
    }

    #[test]
    fn bad_address_names_the_input() {
        let error = parse_address("not-an-address").unwrap_err();
        assert!(error.to_string().contains("not-an-address"));
    }
}
