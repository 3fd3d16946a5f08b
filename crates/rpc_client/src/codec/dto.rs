// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// dto.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! REST DTO to domain decoding.

use super::CodecConfig;
use crate::models::common::value_as_u64;
use crate::models::{CosignatureDto, TransactionDto, TransactionInfoDto, TransactionMetaDto};
use crate::resolver::location_of;
use crate::{ClientError, Result};
use serde_json::Value;
use symbol_core::transaction::*;
use symbol_core::{
    Address, MosaicId, NamespaceId, NetworkType, Transaction, TransactionBody, TransactionType,
    UnresolvedAddress, UnresolvedMosaicId,
};

/// Decodes a REST transaction into the domain model.
///
/// Top-level transactions are located from their own metadata unless the
/// context already carries a location; inner transactions of aggregates are
/// decoded with embedded contexts derived from their parent's.
pub fn dto_to_domain(dto: &TransactionDto, config: &CodecConfig<'_>) -> Result<Transaction> {
    let config = if config.embedded || config.location.is_some() {
        *config
    } else {
        config.at(location_of(dto))
    };
    let info = &dto.transaction;

    let signer_public_key = info.signer()?;
    let network = NetworkType::from_identifier(info.network).unwrap_or(config.properties.network_type);
    let signer_address = Address::from_public_key(&signer_public_key, network);
    let body = decode_body(info, &config, &signer_address, network)?;

    Ok(Transaction {
        signer_public_key,
        signer_address,
        fee: config.fee(info.max_fee.unwrap_or_default()),
        deadline: config.deadline(info.deadline.unwrap_or_default()),
        meta: dto.meta.as_ref().map(meta),
        body,
    })
}

fn meta(dto: &TransactionMetaDto) -> TransactionMeta {
    TransactionMeta {
        hash: dto.hash.clone(),
        height: dto.height,
        index: dto.index,
        timestamp: dto.timestamp,
        aggregate_hash: dto.aggregate_hash.clone(),
        group: None,
    }
}

fn small<T: TryFrom<u64>>(info: &TransactionInfoDto, name: &str) -> Result<T> {
    let value = info.u64(name)?;
    T::try_from(value).map_err(|_| ClientError::codec(format!("field '{name}' out of range: {value}")))
}

fn signed<T: TryFrom<i64>>(info: &TransactionInfoDto, name: &str) -> Result<T> {
    let value = info.i64(name)?;
    T::try_from(value).map_err(|_| ClientError::codec(format!("field '{name}' out of range: {value}")))
}

fn address(info: &TransactionInfoDto, config: &CodecConfig<'_>, name: &str) -> Result<Address> {
    let unresolved = UnresolvedAddress::from_raw_hex(info.str(name)?)?;
    config.resolve_address(&unresolved)
}

fn addresses(info: &TransactionInfoDto, config: &CodecConfig<'_>, name: &str) -> Result<Vec<Address>> {
    info.strings(name)
        .into_iter()
        .map(|text| config.resolve_address(&UnresolvedAddress::from_raw_hex(text)?))
        .collect()
}

fn mosaic_id(info: &TransactionInfoDto, name: &str) -> Result<UnresolvedMosaicId> {
    Ok(info.str(name)?.parse()?)
}

fn mosaic_amount(
    info: &TransactionInfoDto,
    config: &CodecConfig<'_>,
    id_field: &str,
    amount_field: &str,
) -> Result<MosaicAmount> {
    Ok(config.mosaic_amount(mosaic_id(info, id_field)?, info.u64(amount_field)?))
}

fn mosaics(info: &TransactionInfoDto, config: &CodecConfig<'_>) -> Result<Vec<MosaicAmount>> {
    info.array("mosaics")
        .iter()
        .map(|entry| {
            let id = entry
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| ClientError::codec("mosaic entry without id"))?
                .parse::<UnresolvedMosaicId>()?;
            let amount = entry
                .get("amount")
                .and_then(value_as_u64)
                .ok_or_else(|| ClientError::codec(format!("mosaic {id} without amount")))?;
            Ok(config.mosaic_amount(id, amount))
        })
        .collect()
}

fn cosignature(dto: &CosignatureDto) -> Result<Cosignature> {
    Ok(Cosignature {
        signer_public_key: dto.signer_public_key.parse()?,
        signature: hex::decode(&dto.signature)
            .map_err(|_| ClientError::codec(format!("cosignature is not hex: {}", dto.signature)))?,
        version: dto.version,
    })
}

fn aggregate(
    info: &TransactionInfoDto,
    config: &CodecConfig<'_>,
    network: NetworkType,
) -> Result<AggregateBody> {
    let inner_transactions = info
        .transactions
        .iter()
        .enumerate()
        .map(|(position, inner)| {
            let index = inner
                .meta
                .as_ref()
                .map(|meta| meta.index)
                .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX));
            dto_to_domain(inner, &config.inner(index))
        })
        .collect::<Result<Vec<_>>>()?;
    let cosignatures = info.cosignatures.iter().map(cosignature).collect::<Result<Vec<_>>>()?;
    let received_cosignatures = cosignatures
        .iter()
        .map(|cosignature| Address::from_public_key(&cosignature.signer_public_key, network))
        .collect();
    let amount = config.aggregate_amount(&inner_transactions);

    Ok(AggregateBody {
        inner_transactions,
        cosignatures,
        received_cosignatures,
        amount,
    })
}

fn decode_body(
    info: &TransactionInfoDto,
    config: &CodecConfig<'_>,
    signer: &Address,
    network: NetworkType,
) -> Result<TransactionBody> {
    let Some(kind) = TransactionType::from_code(info.type_code) else {
        return Ok(TransactionBody::Base {
            type_code: info.type_code,
        });
    };

    let body = match kind {
        TransactionType::Transfer => {
            let recipient_address = address(info, config, "recipientAddress")?;
            let mosaics = mosaics(info, config)?;
            let message = match info.opt_str("message") {
                Some(text) => Message::from_hex(text)
                    .map_err(|error| ClientError::codec(format!("message: {error}")))?,
                None => None,
            };
            let amount = config.transfer_amount(signer, &recipient_address, &mosaics);
            TransactionBody::Transfer(TransferBody {
                recipient_address,
                mosaics,
                message,
                amount,
            })
        }
        TransactionType::NamespaceRegistration => {
            let registration_type = NamespaceRegistrationType::from_value(small(info, "registrationType")?)?;
            let name = info.bytes("name")?;
            let parent_id = match registration_type {
                NamespaceRegistrationType::SubNamespace => {
                    Some(info.str("parentId")?.parse::<NamespaceId>()?)
                }
                NamespaceRegistrationType::RootNamespace => None,
            };
            let duration = match registration_type {
                NamespaceRegistrationType::RootNamespace => Some(info.u64("duration")?),
                NamespaceRegistrationType::SubNamespace => None,
            };
            TransactionBody::NamespaceRegistration(NamespaceRegistrationBody {
                registration_type,
                namespace_name: String::from_utf8_lossy(&name).into_owned(),
                namespace_id: info.str("id")?.parse()?,
                parent_id,
                duration,
            })
        }
        TransactionType::AddressAlias => TransactionBody::AddressAlias(AddressAliasBody {
            alias_action: AliasAction::from_value(small(info, "aliasAction")?)?,
            namespace: config.namespace_ref(info.str("namespaceId")?.parse()?),
            address: Address::from_raw_hex(info.str("address")?)?,
        }),
        TransactionType::MosaicAlias => TransactionBody::MosaicAlias(MosaicAliasBody {
            alias_action: AliasAction::from_value(small(info, "aliasAction")?)?,
            namespace: config.namespace_ref(info.str("namespaceId")?.parse()?),
            mosaic_id: info.str("mosaicId")?.parse::<MosaicId>()?,
        }),
        TransactionType::MosaicDefinition => TransactionBody::MosaicDefinition(MosaicDefinitionBody {
            mosaic_id: info.str("id")?.parse()?,
            nonce: small(info, "nonce")?,
            flags: MosaicFlags::from_bits(small(info, "flags")?),
            divisibility: small(info, "divisibility")?,
            duration: info.u64("duration")?,
        }),
        TransactionType::MosaicSupplyChange => {
            let id = mosaic_id(info, "mosaicId")?;
            let delta = config.mosaic_amount(id, info.u64("delta")?);
            TransactionBody::MosaicSupplyChange(MosaicSupplyChangeBody {
                mosaic: config.mosaic_ref(id),
                action: MosaicSupplyChangeAction::from_value(small(info, "action")?)?,
                delta: delta.amount,
                divisibility: delta.divisibility,
            })
        }
        TransactionType::MosaicSupplyRevocation => {
            TransactionBody::MosaicSupplyRevocation(MosaicSupplyRevocationBody {
                source_address: address(info, config, "sourceAddress")?,
                mosaic: mosaic_amount(info, config, "mosaicId", "amount")?,
            })
        }
        TransactionType::MultisigAccountModification => {
            TransactionBody::MultisigAccountModification(MultisigAccountModificationBody {
                min_approval_delta: signed(info, "minApprovalDelta")?,
                min_removal_delta: signed(info, "minRemovalDelta")?,
                address_additions: addresses(info, config, "addressAdditions")?,
                address_deletions: addresses(info, config, "addressDeletions")?,
            })
        }
        TransactionType::AggregateComplete => TransactionBody::AggregateComplete(aggregate(info, config, network)?),
        TransactionType::AggregateBonded => TransactionBody::AggregateBonded(aggregate(info, config, network)?),
        TransactionType::HashLock => TransactionBody::HashLock(HashLockBody {
            mosaic: mosaic_amount(info, config, "mosaicId", "amount")?,
            duration: info.u64("duration")?,
            hash: info.bytes("hash")?,
        }),
        TransactionType::SecretLock => TransactionBody::SecretLock(SecretLockBody {
            recipient_address: address(info, config, "recipientAddress")?,
            mosaic: mosaic_amount(info, config, "mosaicId", "amount")?,
            duration: info.u64("duration")?,
            hash_algorithm: LockHashAlgorithm::from_value(small(info, "hashAlgorithm")?)?,
            secret: info.bytes("secret")?,
        }),
        TransactionType::SecretProof => TransactionBody::SecretProof(SecretProofBody {
            recipient_address: address(info, config, "recipientAddress")?,
            hash_algorithm: LockHashAlgorithm::from_value(small(info, "hashAlgorithm")?)?,
            secret: info.bytes("secret")?,
            proof: info.bytes("proof")?,
        }),
        TransactionType::AccountAddressRestriction => {
            TransactionBody::AccountAddressRestriction(AccountAddressRestrictionBody {
                restriction_flags: AccountRestrictionFlags::from_value(small(info, "restrictionFlags")?)?,
                restriction_additions: addresses(info, config, "restrictionAdditions")?,
                restriction_deletions: addresses(info, config, "restrictionDeletions")?,
            })
        }
        TransactionType::AccountMosaicRestriction => {
            let refs = |name: &str| -> Result<Vec<MosaicRef>> {
                info.strings(name)
                    .into_iter()
                    .map(|text| Ok(config.mosaic_ref(text.parse()?)))
                    .collect()
            };
            TransactionBody::AccountMosaicRestriction(AccountMosaicRestrictionBody {
                restriction_flags: AccountRestrictionFlags::from_value(small(info, "restrictionFlags")?)?,
                restriction_additions: refs("restrictionAdditions")?,
                restriction_deletions: refs("restrictionDeletions")?,
            })
        }
        TransactionType::AccountOperationRestriction => {
            let operations = |name: &str| -> Result<Vec<TransactionType>> {
                info.array(name)
                    .iter()
                    .map(|value| {
                        let code = value_as_u64(value)
                            .and_then(|code| u16::try_from(code).ok())
                            .ok_or_else(|| ClientError::codec(format!("'{name}' holds {value}")))?;
                        Ok(TransactionType::try_from(code)?)
                    })
                    .collect()
            };
            TransactionBody::AccountOperationRestriction(AccountOperationRestrictionBody {
                restriction_flags: AccountRestrictionFlags::from_value(small(info, "restrictionFlags")?)?,
                restriction_additions: operations("restrictionAdditions")?,
                restriction_deletions: operations("restrictionDeletions")?,
            })
        }
        TransactionType::AccountKeyLink => TransactionBody::AccountKeyLink(key_link(info)?),
        TransactionType::VrfKeyLink => TransactionBody::VrfKeyLink(key_link(info)?),
        TransactionType::NodeKeyLink => TransactionBody::NodeKeyLink(key_link(info)?),
        TransactionType::VotingKeyLink => TransactionBody::VotingKeyLink(VotingKeyLinkBody {
            linked_public_key: info.str("linkedPublicKey")?.parse()?,
            start_epoch: small(info, "startEpoch")?,
            end_epoch: small(info, "endEpoch")?,
            link_action: LinkAction::from_value(small(info, "linkAction")?)?,
        }),
        TransactionType::MosaicAddressRestriction => {
            TransactionBody::MosaicAddressRestriction(MosaicAddressRestrictionBody {
                mosaic: config.mosaic_ref(mosaic_id(info, "mosaicId")?),
                restriction_key: info.hex_u64("restrictionKey")?,
                target_address: address(info, config, "targetAddress")?,
                previous_restriction_value: info.u64("previousRestrictionValue")?,
                new_restriction_value: info.u64("newRestrictionValue")?,
            })
        }
        TransactionType::MosaicGlobalRestriction => {
            let reference = mosaic_id(info, "referenceMosaicId")
                .ok()
                .filter(|id| id.value() != 0);
            TransactionBody::MosaicGlobalRestriction(MosaicGlobalRestrictionBody {
                mosaic: config.mosaic_ref(mosaic_id(info, "mosaicId")?),
                reference_mosaic: reference.map(|id| config.mosaic_ref(id)),
                restriction_key: info.hex_u64("restrictionKey")?,
                previous_restriction_value: info.u64("previousRestrictionValue")?,
                new_restriction_value: info.u64("newRestrictionValue")?,
                previous_restriction_type: MosaicRestrictionType::from_value(small(
                    info,
                    "previousRestrictionType",
                )?)?,
                new_restriction_type: MosaicRestrictionType::from_value(small(info, "newRestrictionType")?)?,
            })
        }
        TransactionType::AccountMetadata => TransactionBody::AccountMetadata(metadata(info, config, None, None)?),
        TransactionType::MosaicMetadata => {
            let target = config.mosaic_ref(mosaic_id(info, "targetMosaicId")?);
            TransactionBody::MosaicMetadata(metadata(info, config, Some(target), None)?)
        }
        TransactionType::NamespaceMetadata => {
            let target = config.namespace_ref(info.str("targetNamespaceId")?.parse()?);
            TransactionBody::NamespaceMetadata(metadata(info, config, None, Some(target))?)
        }
    };
    Ok(body)
}

fn key_link(info: &TransactionInfoDto) -> Result<KeyLinkBody> {
    Ok(KeyLinkBody {
        linked_public_key: info.str("linkedPublicKey")?.parse()?,
        link_action: LinkAction::from_value(small(info, "linkAction")?)?,
    })
}

fn metadata(
    info: &TransactionInfoDto,
    config: &CodecConfig<'_>,
    target_mosaic: Option<MosaicRef>,
    target_namespace: Option<NamespaceRef>,
) -> Result<MetadataBody> {
    Ok(MetadataBody {
        target_address: address(info, config, "targetAddress")?,
        scoped_metadata_key: info.hex_u64("scopedMetadataKey")?,
        value_size_delta: signed(info, "valueSizeDelta")?,
        value: info.bytes("value")?,
        target_mosaic,
        target_namespace,
    })
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::resolver::{Location, MosaicInfo, ResolvedData, UnresolvedReference};
    use serde_json::json;
    use std::str::FromStr;
    use symbol_core::{Decimal, PublicKey};

    fn alias(name: &str) -> (NamespaceId, String) {
        let id = NamespaceId::from_path(name).unwrap();
        (id, UnresolvedAddress::from_namespace(id, NetworkType::TestNet).to_raw_hex())
    }

    #[test]
    fn decodes_confirmed_transfer_with_alias_recipient() {
        let properties = properties();
        let (signer_key, signer) = account(1);
        let (_, bob) = account(2);
        let (bob_ns, bob_alias) = alias("bob");
        let resolved = ResolvedData::builder()
            .mosaic_info(
                UnresolvedMosaicId::new(CURRENCY),
                MosaicInfo::new(MosaicId::new(CURRENCY), 6),
            )
            .address(
                UnresolvedReference {
                    namespace_id: bob_ns,
                    location: Some(Location::top_level(10, 0)),
                },
                bob,
            )
            .build();
        let dto: TransactionDto = serde_json::from_value(json!({
            "meta": {"height": "10", "hash": "FF", "index": 0, "timestamp": "5"},
            "transaction": {
                "type": 16724,
                "signerPublicKey": signer_key.to_hex(),
                "network": 152,
                "maxFee": "25000",
                "deadline": "1000",
                "recipientAddress": bob_alias,
                "message": "0068656C6C6F",
                "mosaics": [{"id": "72C0212E67A08BCE", "amount": "2500000"}]
            }
        }))
        .unwrap();

        let config = CodecConfig::new(&properties, &resolved).with_current_account(&signer);
        let tx = dto_to_domain(&dto, &config).unwrap();

        assert_eq!(tx.signer_address, signer);
        assert_eq!(tx.fee, Some(Decimal::from_str("0.025").unwrap()));
        assert_eq!(tx.deadline.unwrap().timestamp, 1000);
        assert_eq!(tx.hash(), Some("FF"));
        let TransactionBody::Transfer(body) = &tx.body else {
            panic!("expected transfer");
        };
        assert_eq!(body.recipient_address, bob);
        assert_eq!(body.message.as_ref().and_then(Message::text).as_deref(), Some("hello"));
        assert_eq!(body.mosaics[0].amount, Decimal::from_str("2.5").unwrap());
        assert_eq!(body.amount, Decimal::from_str("-2.5").unwrap());
    }

    #[test]
    fn aggregate_sums_inner_amounts_exactly() {
        let properties = properties();
        let resolved = resolved();
        let (signer_key, me) = account(1);
        let (other_key, other) = account(2);
        let inner = |from: &PublicKey, to: &Address, amount: &str, index: u32| {
            json!({
                "meta": {"height": "3", "index": index, "aggregateHash": "AA"},
                "transaction": {
                    "type": 16724,
                    "signerPublicKey": from.to_hex(),
                    "network": 152,
                    "recipientAddress": to.to_raw_hex(),
                    "mosaics": [{"id": "72C0212E67A08BCE", "amount": amount}]
                }
            })
        };
        let dto: TransactionDto = serde_json::from_value(json!({
            "meta": {"height": "3", "hash": "AA", "index": 0},
            "transaction": {
                "type": 16705,
                "signerPublicKey": signer_key.to_hex(),
                "network": 152,
                "maxFee": "100",
                "deadline": "1",
                "transactions": [
                    inner(&other_key, &me, "1000000", 0),
                    inner(&signer_key, &other, "400000", 1),
                    inner(&other_key, &me, "400000", 2)
                ],
                "cosignatures": [{
                    "version": "0",
                    "signerPublicKey": other_key.to_hex(),
                    "signature": "AB"
                }]
            }
        }))
        .unwrap();

        let config = CodecConfig::new(&properties, &resolved).with_current_account(&me);
        let tx = dto_to_domain(&dto, &config).unwrap();
        let aggregate = tx.body.as_aggregate().unwrap();

        assert_eq!(tx.amount(), Decimal::from_str("1.000000").unwrap());
        assert_eq!(tx.amount().to_string(), "1.000000");
        assert!(aggregate.inner_transactions.iter().all(Transaction::is_embedded));
        assert!(aggregate.is_cosigned_by(&other));
        assert_eq!(aggregate.cosignatures[0].signature, vec![0xAB]);
    }

    #[test]
    fn unknown_type_falls_back_to_base() {
        let properties = properties();
        let resolved = resolved();
        let (signer_key, _) = account(1);
        let dto: TransactionDto = serde_json::from_value(json!({
            "transaction": {
                "type": 0x7777,
                "signerPublicKey": signer_key.to_hex(),
                "network": 152,
                "maxFee": "0",
                "deadline": "0"
            }
        }))
        .unwrap();

        let tx = dto_to_domain(&dto, &CodecConfig::new(&properties, &resolved)).unwrap();
        assert_eq!(tx.body, TransactionBody::Base { type_code: 0x7777 });
        assert!(tx.meta.is_none());
    }

    #[test]
    fn decodes_restriction_and_metadata_kinds() {
        let properties = properties();
        let resolved = resolved();
        let (signer_key, signer) = account(1);
        let decode = |fields: Value| {
            let mut transaction = json!({
                "signerPublicKey": signer_key.to_hex(),
                "network": 152,
                "maxFee": "0",
                "deadline": "0"
            });
            if let (Some(target), Value::Object(extra)) = (transaction.as_object_mut(), fields) {
                target.extend(extra);
            }
            let dto: TransactionDto = serde_json::from_value(json!({ "transaction": transaction })).unwrap();
            dto_to_domain(&dto, &CodecConfig::new(&properties, &resolved)).unwrap()
        };

        let operations = decode(json!({
            "type": 0x4350,
            "restrictionFlags": 0x4004,
            "restrictionAdditions": [0x4154, 16705],
            "restrictionDeletions": []
        }));
        let TransactionBody::AccountOperationRestriction(body) = operations.body else {
            panic!("expected operation restriction");
        };
        assert_eq!(body.restriction_flags, AccountRestrictionFlags::AllowOutgoingTransactionType);
        assert_eq!(
            body.restriction_additions,
            vec![TransactionType::Transfer, TransactionType::AggregateComplete]
        );

        let metadata = decode(json!({
            "type": 0x4144,
            "targetAddress": signer.to_raw_hex(),
            "scopedMetadataKey": "00000000000000FF",
            "valueSizeDelta": -2,
            "value": "6869"
        }));
        let TransactionBody::AccountMetadata(body) = metadata.body else {
            panic!("expected account metadata");
        };
        assert_eq!(body.scoped_metadata_key, 0xFF);
        assert_eq!(body.value_size_delta, -2);
        assert_eq!(body.value_text(), Some("hi"));
    }
}
