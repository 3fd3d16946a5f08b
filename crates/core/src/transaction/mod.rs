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

//! Unified domain transaction model.
//!
//! A [`Transaction`] carries the fields every kind shares and a
//! [`TransactionBody`] with one variant per kind. Unknown type codes decode
//! into [`TransactionBody::Base`] so new chain features never fail decoding.

pub mod body;
pub mod enums;
pub mod types;

pub use body::*;
pub use enums::{
    AccountRestrictionFlags, AliasAction, LinkAction, LockHashAlgorithm, MessageType, MosaicFlags,
    MosaicRestrictionType, MosaicSupplyChangeAction, NamespaceRegistrationType,
};
pub use types::{TransactionGroup, TransactionType};

use crate::{Address, CoreError, Decimal, Deadline, MosaicId, NamespaceId, PublicKey, Result, UnresolvedMosaicId};
use serde::{Deserialize, Serialize};

/// Domain transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub signer_public_key: PublicKey,
    pub signer_address: Address,
    /// Relative network currency fee, `None` for embedded transactions
    pub fee: Option<Decimal>,
    /// `None` for embedded transactions
    pub deadline: Option<Deadline>,
    pub meta: Option<TransactionMeta>,
    #[serde(flatten)]
    pub body: TransactionBody,
}

impl Transaction {
    /// Kind of the transaction, `None` for unknown codes
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.body.transaction_type()
    }

    /// Wire type code
    pub fn type_code(&self) -> u16 {
        self.body.type_code()
    }

    /// Whether this is an inner transaction of an aggregate
    pub fn is_embedded(&self) -> bool {
        self.fee.is_none() && self.deadline.is_none()
    }

    /// Transaction hash when known
    pub fn hash(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|meta| meta.hash.as_deref())
    }

    /// Net network currency amount carried by the transaction
    pub fn amount(&self) -> Decimal {
        match &self.body {
            TransactionBody::Transfer(body) => body.amount,
            TransactionBody::AggregateComplete(body) | TransactionBody::AggregateBonded(body) => {
                body.amount
            }
            _ => Decimal::ZERO,
        }
    }
}

/// Chain metadata attached to fetched transactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    pub hash: Option<String>,
    pub height: Option<u64>,
    pub index: u32,
    pub timestamp: Option<u64>,
    /// Hash of the enclosing aggregate for inner transactions
    pub aggregate_hash: Option<String>,
    pub group: Option<TransactionGroup>,
}

/// One variant per transaction kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum TransactionBody {
    Transfer(TransferBody),
    NamespaceRegistration(NamespaceRegistrationBody),
    AddressAlias(AddressAliasBody),
    MosaicAlias(MosaicAliasBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    MosaicSupplyRevocation(MosaicSupplyRevocationBody),
    MultisigAccountModification(MultisigAccountModificationBody),
    AggregateComplete(AggregateBody),
    AggregateBonded(AggregateBody),
    HashLock(HashLockBody),
    SecretLock(SecretLockBody),
    SecretProof(SecretProofBody),
    AccountAddressRestriction(AccountAddressRestrictionBody),
    AccountMosaicRestriction(AccountMosaicRestrictionBody),
    AccountOperationRestriction(AccountOperationRestrictionBody),
    AccountKeyLink(KeyLinkBody),
    MosaicAddressRestriction(MosaicAddressRestrictionBody),
    MosaicGlobalRestriction(MosaicGlobalRestrictionBody),
    AccountMetadata(MetadataBody),
    MosaicMetadata(MetadataBody),
    NamespaceMetadata(MetadataBody),
    VrfKeyLink(KeyLinkBody),
    VotingKeyLink(VotingKeyLinkBody),
    NodeKeyLink(KeyLinkBody),
    /// Kind this toolkit does not know; only the common fields are kept
    #[serde(rename_all = "camelCase")]
    Base { type_code: u16 },
}

impl TransactionBody {
    /// Kind of the payload, `None` for [`TransactionBody::Base`]
    pub fn transaction_type(&self) -> Option<TransactionType> {
        let kind = match self {
            TransactionBody::Transfer(_) => TransactionType::Transfer,
            TransactionBody::NamespaceRegistration(_) => TransactionType::NamespaceRegistration,
            TransactionBody::AddressAlias(_) => TransactionType::AddressAlias,
            TransactionBody::MosaicAlias(_) => TransactionType::MosaicAlias,
            TransactionBody::MosaicDefinition(_) => TransactionType::MosaicDefinition,
            TransactionBody::MosaicSupplyChange(_) => TransactionType::MosaicSupplyChange,
            TransactionBody::MosaicSupplyRevocation(_) => TransactionType::MosaicSupplyRevocation,
            TransactionBody::MultisigAccountModification(_) => {
                TransactionType::MultisigAccountModification
            }
            TransactionBody::AggregateComplete(_) => TransactionType::AggregateComplete,
            TransactionBody::AggregateBonded(_) => TransactionType::AggregateBonded,
            TransactionBody::HashLock(_) => TransactionType::HashLock,
            TransactionBody::SecretLock(_) => TransactionType::SecretLock,
            TransactionBody::SecretProof(_) => TransactionType::SecretProof,
            TransactionBody::AccountAddressRestriction(_) => TransactionType::AccountAddressRestriction,
            TransactionBody::AccountMosaicRestriction(_) => TransactionType::AccountMosaicRestriction,
            TransactionBody::AccountOperationRestriction(_) => {
                TransactionType::AccountOperationRestriction
            }
            TransactionBody::AccountKeyLink(_) => TransactionType::AccountKeyLink,
            TransactionBody::MosaicAddressRestriction(_) => TransactionType::MosaicAddressRestriction,
            TransactionBody::MosaicGlobalRestriction(_) => TransactionType::MosaicGlobalRestriction,
            TransactionBody::AccountMetadata(_) => TransactionType::AccountMetadata,
            TransactionBody::MosaicMetadata(_) => TransactionType::MosaicMetadata,
            TransactionBody::NamespaceMetadata(_) => TransactionType::NamespaceMetadata,
            TransactionBody::VrfKeyLink(_) => TransactionType::VrfKeyLink,
            TransactionBody::VotingKeyLink(_) => TransactionType::VotingKeyLink,
            TransactionBody::NodeKeyLink(_) => TransactionType::NodeKeyLink,
            TransactionBody::Base { .. } => return None,
        };
        Some(kind)
    }

    /// Wire type code
    pub fn type_code(&self) -> u16 {
        match self {
            TransactionBody::Base { type_code } => *type_code,
            other => other.transaction_type().map(|kind| kind.code()).unwrap_or_default(),
        }
    }

    /// Aggregate payload, if any
    pub fn as_aggregate(&self) -> Option<&AggregateBody> {
        match self {
            TransactionBody::AggregateComplete(body) | TransactionBody::AggregateBonded(body) => Some(body),
            _ => None,
        }
    }
}

/// Mosaic quantity with its display information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicAmount {
    /// Id as written on chain, possibly a namespace alias
    pub id: UnresolvedMosaicId,
    /// Resolved mosaic id
    pub mosaic_id: Option<MosaicId>,
    pub name: Option<String>,
    /// Relative amount
    pub amount: Decimal,
    pub divisibility: u8,
}

impl MosaicAmount {
    /// Amount in integer minor units
    pub fn absolute(&self) -> Result<u64> {
        crate::to_absolute(self.amount, self.divisibility)
    }
}

/// Mosaic reference without a quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicRef {
    pub id: UnresolvedMosaicId,
    pub mosaic_id: Option<MosaicId>,
    pub name: Option<String>,
}

/// Namespace reference with its resolved name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceRef {
    pub id: NamespaceId,
    pub name: Option<String>,
}

/// Transfer message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(with = "crate::hex_serde")]
    pub payload: Vec<u8>,
}

impl Message {
    /// Plain text message
    pub fn plain(text: &str) -> Self {
        Self {
            kind: MessageType::Plain,
            payload: text.as_bytes().to_vec(),
        }
    }

    /// Decodes type byte and payload, `None` for an empty message
    pub fn from_bytes(bytes: &[u8]) -> Result<Option<Self>> {
        let Some((kind, payload)) = bytes.split_first() else {
            return Ok(None);
        };
        Ok(Some(Self {
            kind: MessageType::from_value(*kind)?,
            payload: payload.to_vec(),
        }))
    }

    /// Parses the hex encoding used by REST
    pub fn from_hex(text: &str) -> Result<Option<Self>> {
        let bytes = hex::decode(text).map_err(|_| CoreError::InvalidHex(text.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Type byte followed by the payload
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.payload.len() + 1);
        bytes.push(self.kind.value());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Text of a plain message
    pub fn text(&self) -> Option<String> {
        match self.kind {
            MessageType::Plain => Some(String::from_utf8_lossy(&self.payload).into_owned()),
            _ => None,
        }
    }
}

/// Aggregate cosignature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cosignature {
    pub signer_public_key: PublicKey,
    #[serde(with = "crate::hex_serde")]
    pub signature: Vec<u8>,
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetworkType;
    use std::str::FromStr;

    fn signer() -> PublicKey {
        "C5FB65CB902623D93DF2E682FFB13F99D50FAC24D5FF2A42F68C7CA1772FE8A0"
            .parse()
            .unwrap()
    }

    fn transfer(amount: &str) -> Transaction {
        let signer = signer();
        Transaction {
            signer_public_key: signer,
            signer_address: Address::from_public_key(&signer, NetworkType::TestNet),
            fee: None,
            deadline: None,
            meta: None,
            body: TransactionBody::Transfer(TransferBody {
                recipient_address: Address::from_public_key(&signer, NetworkType::TestNet),
                mosaics: vec![],
                message: Some(Message::plain("hello")),
                amount: Decimal::from_str(amount).unwrap(),
            }),
        }
    }

    #[test]
    fn body_reports_kind_and_code() {
        let tx = transfer("1");
        assert_eq!(tx.transaction_type(), Some(TransactionType::Transfer));
        assert_eq!(tx.type_code(), 0x4154);
        assert!(tx.is_embedded());

        let base = TransactionBody::Base { type_code: 0x9999 };
        assert_eq!(base.transaction_type(), None);
        assert_eq!(base.type_code(), 0x9999);
    }

    #[test]
    fn message_bytes_round_trip() {
        let message = Message::plain("hello");
        assert_eq!(message.to_bytes()[0], 0);
        let decoded = Message::from_bytes(&message.to_bytes()).unwrap().unwrap();
        assert_eq!(decoded, message);
        assert_eq!(decoded.text().as_deref(), Some("hello"));
        assert_eq!(Message::from_hex("").unwrap(), None);
        assert!(Message::from_hex("0741").is_err());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(transfer("-2.5")).unwrap();
        assert_eq!(json["type"], "transfer");
        assert_eq!(json["message"]["payload"], "68656C6C6F");
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back.amount(), Decimal::from_str("-2.5").unwrap());
    }
}
