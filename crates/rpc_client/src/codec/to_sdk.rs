// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// to_sdk.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Domain to SDK encoding.

use super::CodecConfig;
use crate::Result;
use symbol_core::transaction::*;
use symbol_core::{
    to_absolute, Address, SdkAggregate, SdkBody, SdkCosignature, SdkKeyLink, SdkMetadata, SdkMosaic,
    SdkTransaction, Transaction, TransactionBody, UnresolvedAddress, UnresolvedMosaicId,
};

/// Encodes a domain transaction as the SDK object to sign.
///
/// Relative amounts are scaled back to integer minor units; embedded
/// transactions are written with zero fee and deadline.
pub fn domain_to_sdk(tx: &Transaction, config: &CodecConfig<'_>) -> Result<SdkTransaction> {
    let fee = match tx.fee {
        Some(fee) => to_absolute(fee, config.currency_divisibility())?,
        None => 0,
    };

    Ok(SdkTransaction {
        network: tx.signer_address.network().unwrap_or(config.properties.network_type),
        signer_public_key: tx.signer_public_key,
        fee,
        deadline: tx.deadline.map(|deadline| deadline.timestamp).unwrap_or_default(),
        body: encode_body(&tx.body, config)?,
    })
}

fn mosaic(amount: &MosaicAmount) -> Result<SdkMosaic> {
    Ok(SdkMosaic {
        mosaic_id: amount.id,
        amount: amount.absolute()?,
    })
}

fn unresolved(addresses: &[Address]) -> Vec<UnresolvedAddress> {
    addresses.iter().copied().map(UnresolvedAddress::from).collect()
}

fn mosaic_ids(refs: &[MosaicRef]) -> Vec<UnresolvedMosaicId> {
    refs.iter().map(|mosaic| mosaic.id).collect()
}

fn aggregate(body: &AggregateBody, config: &CodecConfig<'_>) -> Result<SdkAggregate> {
    let transactions = body
        .inner_transactions
        .iter()
        .enumerate()
        .map(|(position, inner)| {
            let index = u32::try_from(position).unwrap_or(u32::MAX);
            domain_to_sdk(inner, &config.inner(index))
        })
        .collect::<Result<Vec<_>>>()?;
    let cosignatures = body
        .cosignatures
        .iter()
        .map(|cosignature| SdkCosignature {
            version: cosignature.version,
            signer_public_key: cosignature.signer_public_key,
            signature: cosignature.signature.clone(),
        })
        .collect();
    Ok(SdkAggregate {
        transactions,
        cosignatures,
    })
}

fn key_link(body: &KeyLinkBody) -> SdkKeyLink {
    SdkKeyLink {
        linked_public_key: body.linked_public_key,
        link_action: body.link_action,
    }
}

fn metadata(body: &MetadataBody, target_id: u64) -> SdkMetadata {
    SdkMetadata {
        target_address: body.target_address.into(),
        scoped_metadata_key: body.scoped_metadata_key,
        target_id,
        value_size_delta: body.value_size_delta,
        value: body.value.clone(),
    }
}

fn encode_body(body: &TransactionBody, config: &CodecConfig<'_>) -> Result<SdkBody> {
    let sdk = match body {
        TransactionBody::Transfer(body) => SdkBody::Transfer {
            recipient_address: body.recipient_address.into(),
            mosaics: body.mosaics.iter().map(mosaic).collect::<Result<_>>()?,
            message: body.message.as_ref().map(Message::to_bytes).unwrap_or_default(),
        },
        TransactionBody::NamespaceRegistration(body) => SdkBody::NamespaceRegistration {
            registration_type: body.registration_type,
            id: body.namespace_id,
            parent_id: body.parent_id,
            duration: body.duration.unwrap_or_default(),
            name: body.namespace_name.clone(),
        },
        TransactionBody::AddressAlias(body) => SdkBody::AddressAlias {
            namespace_id: body.namespace.id,
            address: body.address,
            alias_action: body.alias_action,
        },
        TransactionBody::MosaicAlias(body) => SdkBody::MosaicAlias {
            namespace_id: body.namespace.id,
            mosaic_id: body.mosaic_id,
            alias_action: body.alias_action,
        },
        TransactionBody::MosaicDefinition(body) => SdkBody::MosaicDefinition {
            id: body.mosaic_id,
            nonce: body.nonce,
            flags: body.flags,
            divisibility: body.divisibility,
            duration: body.duration,
        },
        TransactionBody::MosaicSupplyChange(body) => SdkBody::MosaicSupplyChange {
            mosaic_id: body.mosaic.id,
            delta: to_absolute(body.delta, body.divisibility)?,
            action: body.action,
        },
        TransactionBody::MosaicSupplyRevocation(body) => SdkBody::MosaicSupplyRevocation {
            source_address: body.source_address.into(),
            mosaic: mosaic(&body.mosaic)?,
        },
        TransactionBody::MultisigAccountModification(body) => SdkBody::MultisigAccountModification {
            min_removal_delta: body.min_removal_delta,
            min_approval_delta: body.min_approval_delta,
            address_additions: unresolved(&body.address_additions),
            address_deletions: unresolved(&body.address_deletions),
        },
        TransactionBody::AggregateComplete(body) => SdkBody::AggregateComplete(aggregate(body, config)?),
        TransactionBody::AggregateBonded(body) => SdkBody::AggregateBonded(aggregate(body, config)?),
        TransactionBody::HashLock(body) => SdkBody::HashLock {
            mosaic: mosaic(&body.mosaic)?,
            duration: body.duration,
            hash: body.hash.clone(),
        },
        TransactionBody::SecretLock(body) => SdkBody::SecretLock {
            recipient_address: body.recipient_address.into(),
            secret: body.secret.clone(),
            mosaic: mosaic(&body.mosaic)?,
            duration: body.duration,
            hash_algorithm: body.hash_algorithm,
        },
        TransactionBody::SecretProof(body) => SdkBody::SecretProof {
            recipient_address: body.recipient_address.into(),
            secret: body.secret.clone(),
            hash_algorithm: body.hash_algorithm,
            proof: body.proof.clone(),
        },
        TransactionBody::AccountAddressRestriction(body) => SdkBody::AccountAddressRestriction {
            restriction_flags: body.restriction_flags,
            restriction_additions: unresolved(&body.restriction_additions),
            restriction_deletions: unresolved(&body.restriction_deletions),
        },
        TransactionBody::AccountMosaicRestriction(body) => SdkBody::AccountMosaicRestriction {
            restriction_flags: body.restriction_flags,
            restriction_additions: mosaic_ids(&body.restriction_additions),
            restriction_deletions: mosaic_ids(&body.restriction_deletions),
        },
        TransactionBody::AccountOperationRestriction(body) => SdkBody::AccountOperationRestriction {
            restriction_flags: body.restriction_flags,
            restriction_additions: body.restriction_additions.iter().map(TransactionType::code).collect(),
            restriction_deletions: body.restriction_deletions.iter().map(TransactionType::code).collect(),
        },
        TransactionBody::AccountKeyLink(body) => SdkBody::AccountKeyLink(key_link(body)),
        TransactionBody::VrfKeyLink(body) => SdkBody::VrfKeyLink(key_link(body)),
        TransactionBody::NodeKeyLink(body) => SdkBody::NodeKeyLink(key_link(body)),
        TransactionBody::VotingKeyLink(body) => SdkBody::VotingKeyLink {
            linked_public_key: body.linked_public_key,
            start_epoch: body.start_epoch,
            end_epoch: body.end_epoch,
            link_action: body.link_action,
        },
        TransactionBody::MosaicAddressRestriction(body) => SdkBody::MosaicAddressRestriction {
            mosaic_id: body.mosaic.id,
            restriction_key: body.restriction_key,
            previous_restriction_value: body.previous_restriction_value,
            new_restriction_value: body.new_restriction_value,
            target_address: body.target_address.into(),
        },
        TransactionBody::MosaicGlobalRestriction(body) => SdkBody::MosaicGlobalRestriction {
            mosaic_id: body.mosaic.id,
            reference_mosaic_id: body
                .reference_mosaic
                .as_ref()
                .map(|mosaic| mosaic.id)
                .unwrap_or(UnresolvedMosaicId::new(0)),
            restriction_key: body.restriction_key,
            previous_restriction_value: body.previous_restriction_value,
            new_restriction_value: body.new_restriction_value,
            previous_restriction_type: body.previous_restriction_type,
            new_restriction_type: body.new_restriction_type,
        },
        TransactionBody::AccountMetadata(body) => SdkBody::AccountMetadata(metadata(body, 0)),
        TransactionBody::MosaicMetadata(body) => {
            let target = body.target_mosaic.as_ref().map(|mosaic| mosaic.id.value());
            SdkBody::MosaicMetadata(metadata(body, target.unwrap_or_default()))
        }
        TransactionBody::NamespaceMetadata(body) => {
            let target = body.target_namespace.as_ref().map(|namespace| namespace.id.value());
            SdkBody::NamespaceMetadata(metadata(body, target.unwrap_or_default()))
        }
        TransactionBody::Base { type_code } => SdkBody::Unknown {
            type_code: *type_code,
        },
    };
    Ok(sdk)
}
