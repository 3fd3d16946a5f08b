// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// lib.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! # symbol-rs: Symbol blockchain toolkit
//!
//! Transaction normalization, reference resolution and node communication
//! for the Symbol blockchain.
//!
//! The toolkit is organized into three crates, re-exported here:
//!
//! - [`config`] - network properties and the toolkit configuration file
//! - [`core`] - addresses, identifiers, amounts and the domain transaction model
//! - [`rpc_client`] - REST and WebSocket clients, the resolver, the codecs and
//!   the announce workflow
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use symbol_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ToolkitConfig::for_network(NetworkType::TestNet)?;
//!     let client = RestClient::new(config.network.node_url.clone())?;
//!
//!     let address: Address = "TBFGROCSIMEYUA3A3NFYLUCIWMV4PYA6T5WALOI".parse()?;
//!     let info = fetch_account_info(&client, &config.network, &address).await?;
//!     println!("balance: {}", info.balance);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use symbol_config as config;
pub use symbol_core as core;
pub use symbol_rpc_client as rpc_client;

/// Common imports for toolkit users
pub mod prelude {
    pub use crate::config::{NetworkProperties, NetworkType, ToolkitConfig};
    pub use crate::core::{
        Address, Decimal, MosaicId, NamespaceId, PublicKey, SignedTransaction, Transaction,
        TransactionBody, TransactionGroup,
    };
    pub use crate::rpc_client::{
        fetch_account_info, fetch_account_transactions, fetch_harvesting_status, AnnounceGroup,
        Announcer, Channel, ClientError, Listener, ListenerEvent, RestClient, StatisticsClient,
    };
}

/// Toolkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
