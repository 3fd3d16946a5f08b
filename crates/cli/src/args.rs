// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// args.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use symbol_config::{LogFormat, NetworkType};
use symbol_core::TransactionGroup;
use symbol_rpc_client::AnnounceGroup;
use url::Url;

/// Command-line arguments for the Symbol toolkit CLI
#[derive(Parser, Debug, Clone)]
#[command(
    name = "symbol-cli",
    version = env!("CARGO_PKG_VERSION"),
    about = "Query, listen to and announce on Symbol nodes"
)]
pub struct CliArgs {
    /// TOML toolkit configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// REST gateway of the node to use, overriding the configuration
    #[arg(long = "node", value_name = "URL", global = true)]
    pub node: Option<Url>,

    /// Network used when no configuration file is given
    #[arg(long = "network", value_enum, default_value = "mainnet", global = true)]
    pub network: NetworkArg,

    /// Log output format, overriding the configuration
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Transactions of an account, decoded from its point of view
    Transactions {
        /// Plain or raw hex address
        address: String,
        #[arg(long, value_enum, default_value = "confirmed")]
        group: GroupArg,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long = "page-size", default_value_t = 10)]
        page_size: u32,
    },
    /// Balances, keys and multisig settings of an account
    Account {
        /// Plain or raw hex address
        address: String,
    },
    /// Delegated harvesting status of an account
    Harvesting {
        /// Main public key of the account
        public_key: String,
    },
    /// Print listener events of an account until interrupted
    Listen {
        /// Plain or raw hex address
        address: String,
    },
    /// Announce a signed transaction to the node and a few known peers
    Announce {
        /// Serialized signed transaction in hex
        payload: String,
        /// Transaction hash in hex
        hash: String,
        #[arg(long, value_enum, default_value = "default")]
        group: AnnounceGroupArg,
    },
    /// Print the network properties reported by the node
    Properties,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkArg {
    Mainnet,
    Testnet,
}

impl From<NetworkArg> for NetworkType {
    fn from(network: NetworkArg) -> Self {
        match network {
            NetworkArg::Mainnet => NetworkType::MainNet,
            NetworkArg::Testnet => NetworkType::TestNet,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Searchable transaction groups
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupArg {
    Confirmed,
    Unconfirmed,
    Partial,
}

impl From<GroupArg> for TransactionGroup {
    fn from(group: GroupArg) -> Self {
        match group {
            GroupArg::Confirmed => TransactionGroup::Confirmed,
            GroupArg::Unconfirmed => TransactionGroup::Unconfirmed,
            GroupArg::Partial => TransactionGroup::Partial,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnounceGroupArg {
    Default,
    Partial,
}

impl From<AnnounceGroupArg> for AnnounceGroup {
    fn from(group: AnnounceGroupArg) -> Self {
        match group {
            AnnounceGroupArg::Default => AnnounceGroup::Default,
            AnnounceGroupArg::Partial => AnnounceGroup::Partial,
        }
    }
}
