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

//! REST and statistics-service data transfer objects.

pub mod account;
pub mod common;
pub mod mosaic;
pub mod namespace;
pub mod network;
pub mod node;
pub mod statement;
pub mod statistics;
pub mod transaction;

pub use account::{
    AccountDto, AccountResponse, LinkedKeyDto, MosaicDto, MultisigDto, MultisigResponse,
    SupplementalPublicKeysDto,
};
pub use common::{Order, Page, PageInfo, Pagination};
pub use mosaic::{MosaicIdsRequest, MosaicInfoDto, MosaicInfoResponse, MosaicNamesDto, MosaicNamesResponse};
pub use namespace::{AliasDto, NamespaceIdsRequest, NamespaceInfoDto, NamespaceInfoResponse, NamespaceNameDto};
pub use network::{ChainInfoDto, FinalizedBlockDto, NetworkConfigurationDto};
pub use node::{NodeInfoDto, UnlockedAccountsDto};
pub use statement::{ResolutionEntryDto, ResolutionSourceDto, ResolutionStatementDto, ResolutionStatementResponse};
pub use statistics::{ApiStatusDto, NodeStatisticsDto};
pub use transaction::{
    AnnounceRequest, AnnounceResponse, CosignatureDto, TransactionDto, TransactionInfoDto,
    TransactionMetaDto, TransactionStatusDto,
};
