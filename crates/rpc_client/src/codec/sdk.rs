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

//! SDK object to domain decoding.

use super::CodecConfig;
use crate::{ClientError, Result};
use symbol_core::transaction::*;
use symbol_core::{
    NamespaceId, SdkAggregate, SdkBody, SdkKeyLink, SdkMetadata, SdkMosaic, SdkTransaction,
    Transaction, TransactionBody, UnresolvedMosaicId,
};

/// Decodes an SDK transaction object into the domain model.
///
/// SDK objects have no chain metadata, so aliases resolve against current
/// chain state unless the context carries a location.
pub fn sdk_to_domain(tx: &SdkTransaction, config: &CodecConfig<'_>) -> Result<Transaction> {
    let signer_address = tx.signer_address();
    let body = decode_body(tx, config, &signer_address)?;

    Ok(Transaction {
        signer_public_key: tx.signer_public_key,
        signer_address,
        fee: config.fee(tx.fee),
        deadline: config.deadline(tx.deadline),
        meta: None,
        body,
    })
}

fn mosaic(config: &CodecConfig<'_>, mosaic: &SdkMosaic) -> MosaicAmount {
    config.mosaic_amount(mosaic.mosaic_id, mosaic.amount)
}

fn aggregate(tx: &SdkTransaction, aggregate: &SdkAggregate, config: &CodecConfig<'_>) -> Result<AggregateBody> {
    let inner_transactions = aggregate
        .transactions
        .iter()
        .enumerate()
        .map(|(position, inner)| {
            let index = u32::try_from(position).unwrap_or(u32::MAX);
            sdk_to_domain(inner, &config.inner(index))
        })
        .collect::<Result<Vec<_>>>()?;
    let cosignatures: Vec<Cosignature> = aggregate
        .cosignatures
        .iter()
        .map(|cosignature| Cosignature {
            signer_public_key: cosignature.signer_public_key,
            signature: cosignature.signature.clone(),
            version: cosignature.version,
        })
        .collect();
    let received_cosignatures = cosignatures
        .iter()
        .map(|cosignature| symbol_core::Address::from_public_key(&cosignature.signer_public_key, tx.network))
        .collect();
    let amount = config.aggregate_amount(&inner_transactions);

    Ok(AggregateBody {
        inner_transactions,
        cosignatures,
        received_cosignatures,
        amount,
    })
}

fn key_link(link: &SdkKeyLink) -> KeyLinkBody {
    KeyLinkBody {
        linked_public_key: link.linked_public_key,
        link_action: link.link_action,
    }
}

fn metadata(
    metadata: &SdkMetadata,
    config: &CodecConfig<'_>,
    target_mosaic: Option<MosaicRef>,
    target_namespace: Option<NamespaceRef>,
) -> Result<MetadataBody> {
    Ok(MetadataBody {
        target_address: config.resolve_address(&metadata.target_address)?,
        scoped_metadata_key: metadata.scoped_metadata_key,
        value_size_delta: metadata.value_size_delta,
        value: metadata.value.clone(),
        target_mosaic,
        target_namespace,
    })
}

fn operations(codes: &[u16]) -> Result<Vec<TransactionType>> {
    codes
        .iter()
        .map(|code| Ok(TransactionType::try_from(*code)?))
        .collect()
}

fn decode_body(
    tx: &SdkTransaction,
    config: &CodecConfig<'_>,
    signer: &symbol_core::Address,
) -> Result<TransactionBody> {
    let body = match &tx.body {
        SdkBody::Transfer {
            recipient_address,
            mosaics,
            message,
        } => {
            let recipient_address = config.resolve_address(recipient_address)?;
            let mosaics: Vec<MosaicAmount> = mosaics.iter().map(|entry| mosaic(config, entry)).collect();
            let message = Message::from_bytes(message)
                .map_err(|error| ClientError::codec(format!("message: {error}")))?;
            let amount = config.transfer_amount(signer, &recipient_address, &mosaics);
            TransactionBody::Transfer(TransferBody {
                recipient_address,
                mosaics,
                message,
                amount,
            })
        }
        SdkBody::NamespaceRegistration {
            registration_type,
            id,
            parent_id,
            duration,
            name,
        } => TransactionBody::NamespaceRegistration(NamespaceRegistrationBody {
            registration_type: *registration_type,
            namespace_name: name.clone(),
            namespace_id: *id,
            parent_id: *parent_id,
            duration: match registration_type {
                NamespaceRegistrationType::RootNamespace => Some(*duration),
                NamespaceRegistrationType::SubNamespace => None,
            },
        }),
        SdkBody::AddressAlias {
            namespace_id,
            address,
            alias_action,
        } => TransactionBody::AddressAlias(AddressAliasBody {
            alias_action: *alias_action,
            namespace: config.namespace_ref(*namespace_id),
            address: *address,
        }),
        SdkBody::MosaicAlias {
            namespace_id,
            mosaic_id,
            alias_action,
        } => TransactionBody::MosaicAlias(MosaicAliasBody {
            alias_action: *alias_action,
            namespace: config.namespace_ref(*namespace_id),
            mosaic_id: *mosaic_id,
        }),
        SdkBody::MosaicDefinition {
            id,
            nonce,
            flags,
            divisibility,
            duration,
        } => TransactionBody::MosaicDefinition(MosaicDefinitionBody {
            mosaic_id: *id,
            nonce: *nonce,
            flags: *flags,
            divisibility: *divisibility,
            duration: *duration,
        }),
        SdkBody::MosaicSupplyChange {
            mosaic_id,
            delta,
            action,
        } => {
            let delta = config.mosaic_amount(*mosaic_id, *delta);
            TransactionBody::MosaicSupplyChange(MosaicSupplyChangeBody {
                mosaic: config.mosaic_ref(*mosaic_id),
                action: *action,
                delta: delta.amount,
                divisibility: delta.divisibility,
            })
        }
        SdkBody::MosaicSupplyRevocation {
            source_address,
            mosaic: revoked,
        } => TransactionBody::MosaicSupplyRevocation(MosaicSupplyRevocationBody {
            source_address: config.resolve_address(source_address)?,
            mosaic: mosaic(config, revoked),
        }),
        SdkBody::MultisigAccountModification {
            min_removal_delta,
            min_approval_delta,
            address_additions,
            address_deletions,
        } => TransactionBody::MultisigAccountModification(MultisigAccountModificationBody {
            min_approval_delta: *min_approval_delta,
            min_removal_delta: *min_removal_delta,
            address_additions: config.resolve_addresses(address_additions)?,
            address_deletions: config.resolve_addresses(address_deletions)?,
        }),
        SdkBody::AggregateComplete(body) => TransactionBody::AggregateComplete(aggregate(tx, body, config)?),
        SdkBody::AggregateBonded(body) => TransactionBody::AggregateBonded(aggregate(tx, body, config)?),
        SdkBody::HashLock {
            mosaic: locked,
            duration,
            hash,
        } => TransactionBody::HashLock(HashLockBody {
            mosaic: mosaic(config, locked),
            duration: *duration,
            hash: hash.clone(),
        }),
        SdkBody::SecretLock {
            recipient_address,
            secret,
            mosaic: locked,
            duration,
            hash_algorithm,
        } => TransactionBody::SecretLock(SecretLockBody {
            recipient_address: config.resolve_address(recipient_address)?,
            mosaic: mosaic(config, locked),
            duration: *duration,
            hash_algorithm: *hash_algorithm,
            secret: secret.clone(),
        }),
        SdkBody::SecretProof {
            recipient_address,
            secret,
            hash_algorithm,
            proof,
        } => TransactionBody::SecretProof(SecretProofBody {
            recipient_address: config.resolve_address(recipient_address)?,
            hash_algorithm: *hash_algorithm,
            secret: secret.clone(),
            proof: proof.clone(),
        }),
        SdkBody::AccountAddressRestriction {
            restriction_flags,
            restriction_additions,
            restriction_deletions,
        } => TransactionBody::AccountAddressRestriction(AccountAddressRestrictionBody {
            restriction_flags: *restriction_flags,
            restriction_additions: config.resolve_addresses(restriction_additions)?,
            restriction_deletions: config.resolve_addresses(restriction_deletions)?,
        }),
        SdkBody::AccountMosaicRestriction {
            restriction_flags,
            restriction_additions,
            restriction_deletions,
        } => TransactionBody::AccountMosaicRestriction(AccountMosaicRestrictionBody {
            restriction_flags: *restriction_flags,
            restriction_additions: restriction_additions.iter().map(|id| config.mosaic_ref(*id)).collect(),
            restriction_deletions: restriction_deletions.iter().map(|id| config.mosaic_ref(*id)).collect(),
        }),
        SdkBody::AccountOperationRestriction {
            restriction_flags,
            restriction_additions,
            restriction_deletions,
        } => TransactionBody::AccountOperationRestriction(AccountOperationRestrictionBody {
            restriction_flags: *restriction_flags,
            restriction_additions: operations(restriction_additions)?,
            restriction_deletions: operations(restriction_deletions)?,
        }),
        SdkBody::AccountKeyLink(link) => TransactionBody::AccountKeyLink(key_link(link)),
        SdkBody::VrfKeyLink(link) => TransactionBody::VrfKeyLink(key_link(link)),
        SdkBody::NodeKeyLink(link) => TransactionBody::NodeKeyLink(key_link(link)),
        SdkBody::VotingKeyLink {
            linked_public_key,
            start_epoch,
            end_epoch,
            link_action,
        } => TransactionBody::VotingKeyLink(VotingKeyLinkBody {
            linked_public_key: *linked_public_key,
            start_epoch: *start_epoch,
            end_epoch: *end_epoch,
            link_action: *link_action,
        }),
        SdkBody::MosaicAddressRestriction {
            mosaic_id,
            restriction_key,
            previous_restriction_value,
            new_restriction_value,
            target_address,
        } => TransactionBody::MosaicAddressRestriction(MosaicAddressRestrictionBody {
            mosaic: config.mosaic_ref(*mosaic_id),
            restriction_key: *restriction_key,
            target_address: config.resolve_address(target_address)?,
            previous_restriction_value: *previous_restriction_value,
            new_restriction_value: *new_restriction_value,
        }),
        SdkBody::MosaicGlobalRestriction {
            mosaic_id,
            reference_mosaic_id,
            restriction_key,
            previous_restriction_value,
            new_restriction_value,
            previous_restriction_type,
            new_restriction_type,
        } => TransactionBody::MosaicGlobalRestriction(MosaicGlobalRestrictionBody {
            mosaic: config.mosaic_ref(*mosaic_id),
            reference_mosaic: (reference_mosaic_id.value() != 0).then(|| config.mosaic_ref(*reference_mosaic_id)),
            restriction_key: *restriction_key,
            previous_restriction_value: *previous_restriction_value,
            new_restriction_value: *new_restriction_value,
            previous_restriction_type: *previous_restriction_type,
            new_restriction_type: *new_restriction_type,
        }),
        SdkBody::AccountMetadata(body) => TransactionBody::AccountMetadata(metadata(body, config, None, None)?),
        SdkBody::MosaicMetadata(body) => {
            let target = config.mosaic_ref(UnresolvedMosaicId::new(body.target_id));
            TransactionBody::MosaicMetadata(metadata(body, config, Some(target), None)?)
        }
        SdkBody::NamespaceMetadata(body) => {
            let target = config.namespace_ref(NamespaceId::new(body.target_id));
            TransactionBody::NamespaceMetadata(metadata(body, config, None, Some(target))?)
        }
        SdkBody::Unknown { type_code } => TransactionBody::Base {
            type_code: *type_code,
        },
    };
    Ok(body)
}
