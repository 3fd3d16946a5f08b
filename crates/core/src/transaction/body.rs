// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// body.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Type-specific payloads of domain transactions.
//!
//! Every amount held here is relative (already scaled by the mosaic's
//! divisibility). Addresses are resolved; the original unresolved ids of
//! mosaics are retained so a payload can be written back to the SDK unchanged.

use super::enums::{
    AccountRestrictionFlags, AliasAction, LinkAction, LockHashAlgorithm, MosaicFlags,
    MosaicRestrictionType, MosaicSupplyChangeAction, NamespaceRegistrationType,
};
use super::{Cosignature, Message, MosaicAmount, MosaicRef, NamespaceRef, Transaction, TransactionType};
use crate::{Address, Decimal, MosaicId, NamespaceId, PublicKey};
use serde::{Deserialize, Serialize};

/// Transfer of mosaics and an optional message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    pub recipient_address: Address,
    pub mosaics: Vec<MosaicAmount>,
    pub message: Option<Message>,
    /// Net network currency amount seen from the current account
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceRegistrationBody {
    pub registration_type: NamespaceRegistrationType,
    pub namespace_name: String,
    pub namespace_id: NamespaceId,
    /// Set for subnamespaces only
    pub parent_id: Option<NamespaceId>,
    /// Set for root namespaces only
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressAliasBody {
    pub alias_action: AliasAction,
    pub namespace: NamespaceRef,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicAliasBody {
    pub alias_action: AliasAction,
    pub namespace: NamespaceRef,
    pub mosaic_id: MosaicId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicDefinitionBody {
    pub mosaic_id: MosaicId,
    pub nonce: u32,
    pub flags: MosaicFlags,
    pub divisibility: u8,
    /// Zero means the mosaic never expires
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicSupplyChangeBody {
    pub mosaic: MosaicRef,
    pub action: MosaicSupplyChangeAction,
    pub delta: Decimal,
    pub divisibility: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicSupplyRevocationBody {
    pub source_address: Address,
    pub mosaic: MosaicAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigAccountModificationBody {
    pub min_approval_delta: i8,
    pub min_removal_delta: i8,
    pub address_additions: Vec<Address>,
    pub address_deletions: Vec<Address>,
}

/// Payload shared by complete and bonded aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateBody {
    pub inner_transactions: Vec<Transaction>,
    pub cosignatures: Vec<Cosignature>,
    /// Addresses of the cosigners, for membership checks
    pub received_cosignatures: Vec<Address>,
    /// Exact sum of the inner transaction amounts
    pub amount: Decimal,
}

impl AggregateBody {
    /// Whether `address` has already cosigned
    pub fn is_cosigned_by(&self, address: &Address) -> bool {
        self.received_cosignatures.contains(address)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashLockBody {
    pub mosaic: MosaicAmount,
    pub duration: u64,
    /// Hash of the locked aggregate bonded transaction
    #[serde(with = "crate::hex_serde")]
    pub hash: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretLockBody {
    pub recipient_address: Address,
    pub mosaic: MosaicAmount,
    pub duration: u64,
    pub hash_algorithm: LockHashAlgorithm,
    #[serde(with = "crate::hex_serde")]
    pub secret: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretProofBody {
    pub recipient_address: Address,
    pub hash_algorithm: LockHashAlgorithm,
    #[serde(with = "crate::hex_serde")]
    pub secret: Vec<u8>,
    #[serde(with = "crate::hex_serde")]
    pub proof: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAddressRestrictionBody {
    pub restriction_flags: AccountRestrictionFlags,
    pub restriction_additions: Vec<Address>,
    pub restriction_deletions: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMosaicRestrictionBody {
    pub restriction_flags: AccountRestrictionFlags,
    pub restriction_additions: Vec<MosaicRef>,
    pub restriction_deletions: Vec<MosaicRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOperationRestrictionBody {
    pub restriction_flags: AccountRestrictionFlags,
    pub restriction_additions: Vec<TransactionType>,
    pub restriction_deletions: Vec<TransactionType>,
}

/// Payload shared by account, node and VRF key links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLinkBody {
    pub linked_public_key: PublicKey,
    pub link_action: LinkAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingKeyLinkBody {
    pub linked_public_key: PublicKey,
    pub start_epoch: u32,
    pub end_epoch: u32,
    pub link_action: LinkAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicAddressRestrictionBody {
    pub mosaic: MosaicRef,
    pub restriction_key: u64,
    pub target_address: Address,
    pub previous_restriction_value: u64,
    pub new_restriction_value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicGlobalRestrictionBody {
    pub mosaic: MosaicRef,
    /// Mosaic whose restriction value is compared, `None` for the mosaic itself
    pub reference_mosaic: Option<MosaicRef>,
    pub restriction_key: u64,
    pub previous_restriction_value: u64,
    pub new_restriction_value: u64,
    pub previous_restriction_type: MosaicRestrictionType,
    pub new_restriction_type: MosaicRestrictionType,
}

/// Payload shared by account, mosaic and namespace metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBody {
    pub target_address: Address,
    pub scoped_metadata_key: u64,
    pub value_size_delta: i16,
    #[serde(with = "crate::hex_serde")]
    pub value: Vec<u8>,
    /// Set for mosaic metadata
    pub target_mosaic: Option<MosaicRef>,
    /// Set for namespace metadata
    pub target_namespace: Option<NamespaceRef>,
}

impl MetadataBody {
    /// The value as text when it is valid UTF-8
    pub fn value_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}
