// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// types.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every transaction kind known to the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    Transfer,
    NamespaceRegistration,
    AddressAlias,
    MosaicAlias,
    MosaicDefinition,
    MosaicSupplyChange,
    MosaicSupplyRevocation,
    MultisigAccountModification,
    AggregateComplete,
    AggregateBonded,
    HashLock,
    SecretLock,
    SecretProof,
    AccountAddressRestriction,
    AccountMosaicRestriction,
    AccountOperationRestriction,
    AccountKeyLink,
    MosaicAddressRestriction,
    MosaicGlobalRestriction,
    AccountMetadata,
    MosaicMetadata,
    NamespaceMetadata,
    VrfKeyLink,
    VotingKeyLink,
    NodeKeyLink,
}

impl TransactionType {
    /// All kinds in chain code order of appearance
    pub const ALL: [TransactionType; 25] = [
        TransactionType::Transfer,
        TransactionType::NamespaceRegistration,
        TransactionType::AddressAlias,
        TransactionType::MosaicAlias,
        TransactionType::MosaicDefinition,
        TransactionType::MosaicSupplyChange,
        TransactionType::MosaicSupplyRevocation,
        TransactionType::MultisigAccountModification,
        TransactionType::AggregateComplete,
        TransactionType::AggregateBonded,
        TransactionType::HashLock,
        TransactionType::SecretLock,
        TransactionType::SecretProof,
        TransactionType::AccountAddressRestriction,
        TransactionType::AccountMosaicRestriction,
        TransactionType::AccountOperationRestriction,
        TransactionType::AccountKeyLink,
        TransactionType::MosaicAddressRestriction,
        TransactionType::MosaicGlobalRestriction,
        TransactionType::AccountMetadata,
        TransactionType::MosaicMetadata,
        TransactionType::NamespaceMetadata,
        TransactionType::VrfKeyLink,
        TransactionType::VotingKeyLink,
        TransactionType::NodeKeyLink,
    ];

    /// Numeric type code used on the wire
    pub const fn code(&self) -> u16 {
        match self {
            TransactionType::Transfer => 0x4154,
            TransactionType::NamespaceRegistration => 0x414E,
            TransactionType::AddressAlias => 0x424E,
            TransactionType::MosaicAlias => 0x434E,
            TransactionType::MosaicDefinition => 0x414D,
            TransactionType::MosaicSupplyChange => 0x424D,
            TransactionType::MosaicSupplyRevocation => 0x434D,
            TransactionType::MultisigAccountModification => 0x4155,
            TransactionType::AggregateComplete => 0x4141,
            TransactionType::AggregateBonded => 0x4241,
            TransactionType::HashLock => 0x4148,
            TransactionType::SecretLock => 0x4152,
            TransactionType::SecretProof => 0x4252,
            TransactionType::AccountAddressRestriction => 0x4150,
            TransactionType::AccountMosaicRestriction => 0x4250,
            TransactionType::AccountOperationRestriction => 0x4350,
            TransactionType::AccountKeyLink => 0x414C,
            TransactionType::MosaicAddressRestriction => 0x4251,
            TransactionType::MosaicGlobalRestriction => 0x4151,
            TransactionType::AccountMetadata => 0x4144,
            TransactionType::MosaicMetadata => 0x4244,
            TransactionType::NamespaceMetadata => 0x4344,
            TransactionType::VrfKeyLink => 0x4243,
            TransactionType::VotingKeyLink => 0x4143,
            TransactionType::NodeKeyLink => 0x424C,
        }
    }

    /// Looks up a kind by wire code
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }

    /// Whether the kind wraps inner transactions
    pub const fn is_aggregate(&self) -> bool {
        matches!(
            self,
            TransactionType::AggregateComplete | TransactionType::AggregateBonded
        )
    }

    /// Descriptor name understood by the SDK transaction factory
    pub const fn sdk_name(&self) -> &'static str {
        match self {
            TransactionType::Transfer => "transfer_transaction_v1",
            TransactionType::NamespaceRegistration => "namespace_registration_transaction_v1",
            TransactionType::AddressAlias => "address_alias_transaction_v1",
            TransactionType::MosaicAlias => "mosaic_alias_transaction_v1",
            TransactionType::MosaicDefinition => "mosaic_definition_transaction_v1",
            TransactionType::MosaicSupplyChange => "mosaic_supply_change_transaction_v1",
            TransactionType::MosaicSupplyRevocation => "mosaic_supply_revocation_transaction_v1",
            TransactionType::MultisigAccountModification => {
                "multisig_account_modification_transaction_v1"
            }
            TransactionType::AggregateComplete => "aggregate_complete_transaction_v2",
            TransactionType::AggregateBonded => "aggregate_bonded_transaction_v2",
            TransactionType::HashLock => "hash_lock_transaction_v1",
            TransactionType::SecretLock => "secret_lock_transaction_v1",
            TransactionType::SecretProof => "secret_proof_transaction_v1",
            TransactionType::AccountAddressRestriction => {
                "account_address_restriction_transaction_v1"
            }
            TransactionType::AccountMosaicRestriction => "account_mosaic_restriction_transaction_v1",
            TransactionType::AccountOperationRestriction => {
                "account_operation_restriction_transaction_v1"
            }
            TransactionType::AccountKeyLink => "account_key_link_transaction_v1",
            TransactionType::MosaicAddressRestriction => "mosaic_address_restriction_transaction_v1",
            TransactionType::MosaicGlobalRestriction => "mosaic_global_restriction_transaction_v1",
            TransactionType::AccountMetadata => "account_metadata_transaction_v1",
            TransactionType::MosaicMetadata => "mosaic_metadata_transaction_v1",
            TransactionType::NamespaceMetadata => "namespace_metadata_transaction_v1",
            TransactionType::VrfKeyLink => "vrf_key_link_transaction_v1",
            TransactionType::VotingKeyLink => "voting_key_link_transaction_v1",
            TransactionType::NodeKeyLink => "node_key_link_transaction_v1",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u16> for TransactionType {
    type Error = CoreError;

    fn try_from(code: u16) -> Result<Self> {
        Self::from_code(code).ok_or_else(|| CoreError::unknown_value("transaction type", code))
    }
}

/// REST transaction group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionGroup {
    Confirmed,
    Unconfirmed,
    Partial,
    Failed,
}

impl TransactionGroup {
    /// Path segment used by `/transactions/{group}`
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionGroup::Confirmed => "confirmed",
            TransactionGroup::Unconfirmed => "unconfirmed",
            TransactionGroup::Partial => "partial",
            TransactionGroup::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "confirmed" => Ok(TransactionGroup::Confirmed),
            "unconfirmed" => Ok(TransactionGroup::Unconfirmed),
            "partial" => Ok(TransactionGroup::Partial),
            "failed" => Ok(TransactionGroup::Failed),
            other => Err(CoreError::unknown_value("transaction group", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique_and_reversible() {
        let codes: HashSet<u16> = TransactionType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), TransactionType::ALL.len());
        for kind in TransactionType::ALL {
            assert_eq!(TransactionType::from_code(kind.code()), Some(kind));
        }
        assert_eq!(TransactionType::from_code(16724), Some(TransactionType::Transfer));
        assert!(TransactionType::try_from(0x1234).is_err());
    }

    #[test]
    fn groups_parse() {
        assert_eq!("partial".parse::<TransactionGroup>().unwrap(), TransactionGroup::Partial);
        assert!("pending".parse::<TransactionGroup>().is_err());
    }
}
