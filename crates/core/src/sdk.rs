// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// sdk.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Boundary to the external SDK that lays out, signs and parses transaction bytes.
//!
//! Objects on this side of the boundary always carry absolute integer amounts
//! and unresolved addresses and mosaic ids, exactly as they are written on chain.

use crate::transaction::{
    AccountRestrictionFlags, AliasAction, LinkAction, LockHashAlgorithm, MosaicFlags,
    MosaicRestrictionType, MosaicSupplyChangeAction, NamespaceRegistrationType, TransactionType,
};
use crate::{
    Address, CoreError, MosaicId, NamespaceId, NetworkType, PublicKey, Result, UnresolvedAddress,
    UnresolvedMosaicId,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Transaction as understood by the SDK
#[derive(Debug, Clone, PartialEq)]
pub struct SdkTransaction {
    pub network: NetworkType,
    pub signer_public_key: PublicKey,
    /// Absolute fee, zero for embedded transactions
    pub fee: u64,
    /// Network time in milliseconds, zero for embedded transactions
    pub deadline: u64,
    pub body: SdkBody,
}

impl SdkTransaction {
    /// Kind of the transaction, `None` for unknown codes
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.body.transaction_type()
    }

    /// Wire type code
    pub fn type_code(&self) -> u16 {
        match &self.body {
            SdkBody::Unknown { type_code } => *type_code,
            body => body.transaction_type().map(|kind| kind.code()).unwrap_or_default(),
        }
    }

    /// Address of the signer
    pub fn signer_address(&self) -> Address {
        Address::from_public_key(&self.signer_public_key, self.network)
    }
}

/// Mosaic quantity in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdkMosaic {
    pub mosaic_id: UnresolvedMosaicId,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SdkAggregate {
    pub transactions: Vec<SdkTransaction>,
    pub cosignatures: Vec<SdkCosignature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkCosignature {
    pub version: u64,
    pub signer_public_key: PublicKey,
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdkKeyLink {
    pub linked_public_key: PublicKey,
    pub link_action: LinkAction,
}

/// Metadata payload; `target_id` is zero for account metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkMetadata {
    pub target_address: UnresolvedAddress,
    pub scoped_metadata_key: u64,
    pub target_id: u64,
    pub value_size_delta: i16,
    pub value: Vec<u8>,
}

/// Type-specific payloads at the SDK boundary
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SdkBody {
    Transfer {
        recipient_address: UnresolvedAddress,
        mosaics: Vec<SdkMosaic>,
        /// Type byte followed by the payload, empty when there is no message
        message: Vec<u8>,
    },
    NamespaceRegistration {
        registration_type: NamespaceRegistrationType,
        id: NamespaceId,
        parent_id: Option<NamespaceId>,
        duration: u64,
        name: String,
    },
    AddressAlias {
        namespace_id: NamespaceId,
        address: Address,
        alias_action: AliasAction,
    },
    MosaicAlias {
        namespace_id: NamespaceId,
        mosaic_id: MosaicId,
        alias_action: AliasAction,
    },
    MosaicDefinition {
        id: MosaicId,
        nonce: u32,
        flags: MosaicFlags,
        divisibility: u8,
        duration: u64,
    },
    MosaicSupplyChange {
        mosaic_id: UnresolvedMosaicId,
        delta: u64,
        action: MosaicSupplyChangeAction,
    },
    MosaicSupplyRevocation {
        source_address: UnresolvedAddress,
        mosaic: SdkMosaic,
    },
    MultisigAccountModification {
        min_removal_delta: i8,
        min_approval_delta: i8,
        address_additions: Vec<UnresolvedAddress>,
        address_deletions: Vec<UnresolvedAddress>,
    },
    AggregateComplete(SdkAggregate),
    AggregateBonded(SdkAggregate),
    HashLock {
        mosaic: SdkMosaic,
        duration: u64,
        hash: Vec<u8>,
    },
    SecretLock {
        recipient_address: UnresolvedAddress,
        secret: Vec<u8>,
        mosaic: SdkMosaic,
        duration: u64,
        hash_algorithm: LockHashAlgorithm,
    },
    SecretProof {
        recipient_address: UnresolvedAddress,
        secret: Vec<u8>,
        hash_algorithm: LockHashAlgorithm,
        proof: Vec<u8>,
    },
    AccountAddressRestriction {
        restriction_flags: AccountRestrictionFlags,
        restriction_additions: Vec<UnresolvedAddress>,
        restriction_deletions: Vec<UnresolvedAddress>,
    },
    AccountMosaicRestriction {
        restriction_flags: AccountRestrictionFlags,
        restriction_additions: Vec<UnresolvedMosaicId>,
        restriction_deletions: Vec<UnresolvedMosaicId>,
    },
    AccountOperationRestriction {
        restriction_flags: AccountRestrictionFlags,
        restriction_additions: Vec<u16>,
        restriction_deletions: Vec<u16>,
    },
    AccountKeyLink(SdkKeyLink),
    MosaicAddressRestriction {
        mosaic_id: UnresolvedMosaicId,
        restriction_key: u64,
        previous_restriction_value: u64,
        new_restriction_value: u64,
        target_address: UnresolvedAddress,
    },
    MosaicGlobalRestriction {
        mosaic_id: UnresolvedMosaicId,
        /// Zero when the restriction references the mosaic itself
        reference_mosaic_id: UnresolvedMosaicId,
        restriction_key: u64,
        previous_restriction_value: u64,
        new_restriction_value: u64,
        previous_restriction_type: MosaicRestrictionType,
        new_restriction_type: MosaicRestrictionType,
    },
    AccountMetadata(SdkMetadata),
    MosaicMetadata(SdkMetadata),
    NamespaceMetadata(SdkMetadata),
    VrfKeyLink(SdkKeyLink),
    VotingKeyLink {
        linked_public_key: PublicKey,
        start_epoch: u32,
        end_epoch: u32,
        link_action: LinkAction,
    },
    NodeKeyLink(SdkKeyLink),
    Unknown {
        type_code: u16,
    },
}

impl SdkBody {
    /// Kind of the payload, `None` for [`SdkBody::Unknown`]
    pub fn transaction_type(&self) -> Option<TransactionType> {
        let kind = match self {
            SdkBody::Transfer { .. } => TransactionType::Transfer,
            SdkBody::NamespaceRegistration { .. } => TransactionType::NamespaceRegistration,
            SdkBody::AddressAlias { .. } => TransactionType::AddressAlias,
            SdkBody::MosaicAlias { .. } => TransactionType::MosaicAlias,
            SdkBody::MosaicDefinition { .. } => TransactionType::MosaicDefinition,
            SdkBody::MosaicSupplyChange { .. } => TransactionType::MosaicSupplyChange,
            SdkBody::MosaicSupplyRevocation { .. } => TransactionType::MosaicSupplyRevocation,
            SdkBody::MultisigAccountModification { .. } => TransactionType::MultisigAccountModification,
            SdkBody::AggregateComplete(_) => TransactionType::AggregateComplete,
            SdkBody::AggregateBonded(_) => TransactionType::AggregateBonded,
            SdkBody::HashLock { .. } => TransactionType::HashLock,
            SdkBody::SecretLock { .. } => TransactionType::SecretLock,
            SdkBody::SecretProof { .. } => TransactionType::SecretProof,
            SdkBody::AccountAddressRestriction { .. } => TransactionType::AccountAddressRestriction,
            SdkBody::AccountMosaicRestriction { .. } => TransactionType::AccountMosaicRestriction,
            SdkBody::AccountOperationRestriction { .. } => TransactionType::AccountOperationRestriction,
            SdkBody::AccountKeyLink(_) => TransactionType::AccountKeyLink,
            SdkBody::MosaicAddressRestriction { .. } => TransactionType::MosaicAddressRestriction,
            SdkBody::MosaicGlobalRestriction { .. } => TransactionType::MosaicGlobalRestriction,
            SdkBody::AccountMetadata(_) => TransactionType::AccountMetadata,
            SdkBody::MosaicMetadata(_) => TransactionType::MosaicMetadata,
            SdkBody::NamespaceMetadata(_) => TransactionType::NamespaceMetadata,
            SdkBody::VrfKeyLink(_) => TransactionType::VrfKeyLink,
            SdkBody::VotingKeyLink { .. } => TransactionType::VotingKeyLink,
            SdkBody::NodeKeyLink(_) => TransactionType::NodeKeyLink,
            SdkBody::Unknown { .. } => return None,
        };
        Some(kind)
    }
}

/// Account private key, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Wraps raw key bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for PrivateKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let mut bytes = hex::decode(s.trim()).map_err(|_| CoreError::InvalidHex("private key".into()))?;
        let key = <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| CoreError::InvalidHex("private key".into()));
        bytes.zeroize();
        key.map(Self)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// Signed, serialized transaction ready to announce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(with = "crate::hex_serde")]
    payload: Vec<u8>,
    hash: String,
}

impl SignedTransaction {
    /// Wraps a serialized payload and its hash
    pub fn new(payload: Vec<u8>, hash: [u8; 32]) -> Self {
        Self {
            payload,
            hash: hex::encode_upper(hash),
        }
    }

    /// Parses hex payload and hash as produced by other tools
    pub fn from_hex(payload: &str, hash: &str) -> Result<Self> {
        let payload = hex::decode(payload.trim())?;
        let hash = <[u8; 32]>::try_from(hex::decode(hash.trim())?.as_slice())
            .map_err(|_| CoreError::InvalidHex(hash.to_string()))?;
        Ok(Self::new(payload, hash))
    }

    /// Serialized bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serialized bytes as uppercase hex, as REST expects them
    pub fn payload_hex(&self) -> String {
        hex::encode_upper(&self.payload)
    }

    /// 64-character uppercase transaction hash
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

/// Sequencing policy of a bundle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BundleType {
    /// Independent transactions announced concurrently
    #[default]
    Default,
    /// Hash lock followed by a bonded aggregate awaiting cosignatures
    MultisigTransfer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleMetadata {
    #[serde(rename = "type")]
    pub bundle_type: BundleType,
}

/// Ordered signed transactions plus the policy used to announce them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBundle {
    pub transactions: Vec<SignedTransaction>,
    pub metadata: BundleMetadata,
}

impl TransactionBundle {
    pub fn new(transactions: Vec<SignedTransaction>, bundle_type: BundleType) -> Self {
        Self {
            transactions,
            metadata: BundleMetadata { bundle_type },
        }
    }

    pub fn bundle_type(&self) -> BundleType {
        self.metadata.bundle_type
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Transaction layout, signing and parsing provided by a Symbol SDK.
pub trait SymbolSdk: Send + Sync {
    /// Serializes and signs a transaction
    fn sign(&self, transaction: &SdkTransaction, key: &PrivateKey) -> Result<SignedTransaction>;

    /// Parses a serialized transaction
    fn deserialize(&self, payload: &[u8]) -> Result<SdkTransaction>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_debug_is_redacted() {
        let key: PrivateKey = "11".repeat(32).parse().unwrap();
        assert_eq!(format!("{key:?}"), "PrivateKey(..)");
        assert_eq!(key.as_bytes()[0], 0x11);
        assert!("11".parse::<PrivateKey>().is_err());
    }

    #[test]
    fn signed_transaction_hex_forms() {
        let signed = SignedTransaction::from_hex("abcd", &"0F".repeat(32)).unwrap();
        assert_eq!(signed.payload(), &[0xAB, 0xCD]);
        assert_eq!(signed.payload_hex(), "ABCD");
        assert_eq!(signed.hash(), "0F".repeat(32));
        assert!(SignedTransaction::from_hex("abcd", "0F").is_err());
    }

    #[test]
    fn unknown_body_keeps_code() {
        let tx = SdkTransaction {
            network: NetworkType::TestNet,
            signer_public_key: PublicKey::from_bytes([1; 32]),
            fee: 0,
            deadline: 0,
            body: SdkBody::Unknown { type_code: 0x1234 },
        };
        assert_eq!(tx.type_code(), 0x1234);
        assert_eq!(tx.transaction_type(), None);
        assert_eq!(tx.signer_address().network(), Some(NetworkType::TestNet));
    }

    #[test]
    fn bundle_defaults_to_concurrent_policy() {
        let bundle = TransactionBundle::new(vec![], BundleType::default());
        assert_eq!(bundle.bundle_type(), BundleType::Default);
        assert!(bundle.is_empty());
    }
}
