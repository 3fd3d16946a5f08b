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

//! Symbol node client.
//!
//! REST and statistics-service access, reference resolution, transaction
//! decoding, the WebSocket listener, the announcement workflow and the
//! harvesting status resolver.

pub mod account;
pub mod announce;
pub mod codec;
mod error;
pub mod harvesting;
pub mod listener;
pub mod models;
pub mod resolver;
pub mod rest_client;
pub mod statistics;

pub use account::{fetch_account_info, fetch_account_transactions, AccountInfo, MultisigInfo};
pub use announce::{create_bundle, Announcer, Stage};
pub use codec::{domain_to_sdk, dto_to_domain, sdk_to_domain, CodecConfig};
pub use error::{ClientError, NodeFailure, ProtocolError, Result};
pub use harvesting::{fetch_harvesting_status, HarvestingState, HarvestingStatus};
pub use listener::{
    Channel, CloseCallback, CloseEvent, CloseHandle, CosignatureEvent, Listener, ListenerEvent,
    ListenerState, TransactionStatusError,
};
pub use resolver::{extract_references, resolve, FieldMap, Location, ResolvedData, UnresolvedReferences};
pub use rest_client::{create_api_url, AnnounceGroup, RestClient, TransactionFilter};
pub use statistics::StatisticsClient;
