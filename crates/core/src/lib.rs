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

//! # Symbol Core
//!
//! Core types for the Symbol client toolkit.
//!
//! This crate provides the identifiers, amount arithmetic and the unified domain
//! transaction model shared by the REST, WebSocket and announcement layers, plus
//! the boundary to the external SDK that signs and deserializes transactions.
//!
//! ## Architecture
//!
//! - **Identifiers**: `address`, `ids` - addresses, public keys, mosaic and namespace ids
//! - **Values**: `amount`, `deadline` - exact decimal amounts and network time
//! - **Domain**: `transaction` - one variant per transaction kind
//! - **SDK boundary**: `sdk` - absolute-amount wire objects, signing and bundles

#![warn(missing_docs)]

/// Addresses and their base32 encoding
pub mod address;
/// Relative/absolute amount conversion
pub mod amount;
/// Transaction deadlines
pub mod deadline;
/// Core error types
pub mod error;
/// Public keys, mosaic ids and namespace ids
pub mod ids;
/// External SDK boundary
pub mod sdk;
/// Unified domain transaction model
pub mod transaction;

mod hex_serde;

pub use address::{Address, UnresolvedAddress};
pub use amount::{sum_at_divisibility, to_absolute, to_relative};
pub use deadline::Deadline;
pub use error::{CoreError, Result};
pub use ids::{MosaicId, NamespaceId, PublicKey, UnresolvedMosaicId};
pub use sdk::{
    BundleMetadata, BundleType, PrivateKey, SdkAggregate, SdkBody, SdkCosignature, SdkKeyLink,
    SdkMetadata, SdkMosaic, SdkTransaction, SignedTransaction, SymbolSdk, TransactionBundle,
};
pub use transaction::{
    Cosignature, Message, MosaicAmount, MosaicRef, NamespaceRef, Transaction, TransactionBody,
    TransactionGroup, TransactionMeta, TransactionType,
};

pub use rust_decimal::Decimal;
pub use symbol_config::NetworkType;
