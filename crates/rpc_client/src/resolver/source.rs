// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// source.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{FieldMode, FieldValue, ReferenceSource};
use crate::models::TransactionDto;
use serde_json::Value;
use symbol_core::{
    NamespaceId, SdkBody, SdkTransaction, TransactionType, UnresolvedAddress, UnresolvedMosaicId,
};

fn rest_mosaic(value: &Value) -> Option<UnresolvedMosaicId> {
    let text = match value {
        Value::String(text) => text.as_str(),
        Value::Object(object) => object.get("id")?.as_str()?,
        _ => return None,
    };
    text.parse::<UnresolvedMosaicId>().ok().filter(|id| id.value() != 0)
}

impl ReferenceSource for TransactionDto {
    fn transaction_type(&self) -> Option<TransactionType> {
        TransactionType::from_code(self.transaction.type_code)
    }

    fn height(&self) -> Option<u64> {
        self.meta.as_ref().and_then(|meta| meta.height)
    }

    fn index(&self) -> Option<u32> {
        self.meta.as_ref().map(|meta| meta.index)
    }

    fn inner_transactions(&self) -> &[Self] {
        &self.transaction.transactions
    }

    fn field(&self, field: &str, mode: FieldMode) -> Option<FieldValue> {
        let value = self.transaction.field(field)?;
        match mode {
            FieldMode::Address => {
                let address = UnresolvedAddress::from_raw_hex(value.as_str()?).ok()?;
                Some(FieldValue::Addresses(vec![address]))
            }
            FieldMode::AddressArray => Some(FieldValue::Addresses(
                value
                    .as_array()?
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(|text| UnresolvedAddress::from_raw_hex(text).ok())
                    .collect(),
            )),
            FieldMode::Mosaic => rest_mosaic(value).map(|id| FieldValue::Mosaics(vec![id])),
            FieldMode::MosaicArray => Some(FieldValue::Mosaics(
                value.as_array()?.iter().filter_map(rest_mosaic).collect(),
            )),
            FieldMode::Namespace => value
                .as_str()?
                .parse::<NamespaceId>()
                .ok()
                .filter(|id| id.value() != 0)
                .map(FieldValue::Namespace),
        }
    }
}

impl ReferenceSource for SdkTransaction {
    fn transaction_type(&self) -> Option<TransactionType> {
        self.body.transaction_type()
    }

    // Objects built locally have not been confirmed yet.
    fn height(&self) -> Option<u64> {
        None
    }

    fn index(&self) -> Option<u32> {
        None
    }

    fn inner_transactions(&self) -> &[Self] {
        match &self.body {
            SdkBody::AggregateComplete(aggregate) | SdkBody::AggregateBonded(aggregate) => {
                &aggregate.transactions
            }
            _ => &[],
        }
    }

    fn field(&self, field: &str, _mode: FieldMode) -> Option<FieldValue> {
        let addresses = |list: &[UnresolvedAddress]| Some(FieldValue::Addresses(list.to_vec()));
        let mosaic = |id: UnresolvedMosaicId| {
            (id.value() != 0).then(|| FieldValue::Mosaics(vec![id]))
        };

        match (&self.body, field) {
            (SdkBody::Transfer { recipient_address, .. }, "recipient_address")
            | (SdkBody::SecretLock { recipient_address, .. }, "recipient_address")
            | (SdkBody::SecretProof { recipient_address, .. }, "recipient_address") => {
                addresses(std::slice::from_ref(recipient_address))
            }
            (SdkBody::Transfer { mosaics, .. }, "mosaics") => Some(FieldValue::Mosaics(
                mosaics.iter().map(|mosaic| mosaic.mosaic_id).collect(),
            )),
            (SdkBody::NamespaceRegistration { id, .. }, "id") => Some(FieldValue::Namespace(*id)),
            (SdkBody::NamespaceRegistration { parent_id, .. }, "parent_id") => {
                parent_id.map(FieldValue::Namespace)
            }
            (SdkBody::AddressAlias { namespace_id, .. }, "namespace_id")
            | (SdkBody::MosaicAlias { namespace_id, .. }, "namespace_id") => {
                Some(FieldValue::Namespace(*namespace_id))
            }
            (SdkBody::MosaicAlias { mosaic_id, .. }, "mosaic_id") => mosaic((*mosaic_id).into()),
            (SdkBody::MosaicDefinition { id, .. }, "id") => mosaic((*id).into()),
            (SdkBody::MosaicSupplyChange { mosaic_id, .. }, "mosaic_id")
            | (SdkBody::MosaicAddressRestriction { mosaic_id, .. }, "mosaic_id")
            | (SdkBody::MosaicGlobalRestriction { mosaic_id, .. }, "mosaic_id") => mosaic(*mosaic_id),
            (SdkBody::MosaicGlobalRestriction { reference_mosaic_id, .. }, "reference_mosaic_id") => {
                mosaic(*reference_mosaic_id)
            }
            (SdkBody::MosaicSupplyRevocation { source_address, .. }, "source_address") => {
                addresses(std::slice::from_ref(source_address))
            }
            (SdkBody::MosaicSupplyRevocation { mosaic: value, .. }, "mosaic")
            | (SdkBody::HashLock { mosaic: value, .. }, "mosaic")
            | (SdkBody::SecretLock { mosaic: value, .. }, "mosaic") => mosaic(value.mosaic_id),
            (SdkBody::MultisigAccountModification { address_additions, .. }, "address_additions") => {
                addresses(address_additions)
            }
            (SdkBody::MultisigAccountModification { address_deletions, .. }, "address_deletions") => {
                addresses(address_deletions)
            }
            (SdkBody::AccountAddressRestriction { restriction_additions, .. }, "restriction_additions") => {
                addresses(restriction_additions)
            }
            (SdkBody::AccountAddressRestriction { restriction_deletions, .. }, "restriction_deletions") => {
                addresses(restriction_deletions)
            }
            (SdkBody::AccountMosaicRestriction { restriction_additions, .. }, "restriction_additions") => {
                Some(FieldValue::Mosaics(restriction_additions.clone()))
            }
            (SdkBody::AccountMosaicRestriction { restriction_deletions, .. }, "restriction_deletions") => {
                Some(FieldValue::Mosaics(restriction_deletions.clone()))
            }
            (SdkBody::MosaicAddressRestriction { target_address, .. }, "target_address") => {
                addresses(std::slice::from_ref(target_address))
            }
            (SdkBody::AccountMetadata(metadata), "target_address")
            | (SdkBody::MosaicMetadata(metadata), "target_address")
            | (SdkBody::NamespaceMetadata(metadata), "target_address") => {
                addresses(std::slice::from_ref(&metadata.target_address))
            }
            (SdkBody::MosaicMetadata(metadata), "target_mosaic_id") => {
                mosaic(UnresolvedMosaicId::new(metadata.target_id))
            }
            (SdkBody::NamespaceMetadata(metadata), "target_namespace_id") => {
                Some(FieldValue::Namespace(NamespaceId::new(metadata.target_id)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{extract_references, FieldMap, Location};
    use serde_json::json;
    use symbol_core::{MosaicId, NetworkType, PublicKey, SdkMosaic};

    const SIGNER: &str = "C5FB65CB902623D93DF2E682FFB13F99D50FAC24D5FF2A42F68C7CA1772FE8A0";

    fn alias_hex(name: &str) -> String {
        UnresolvedAddress::from_namespace(NamespaceId::from_path(name).unwrap(), NetworkType::TestNet)
            .to_raw_hex()
    }

    #[test]
    fn rest_aggregate_references() {
        let dto: TransactionDto = serde_json::from_value(json!({
            "meta": {"height": "100", "hash": "AA", "index": 2},
            "transaction": {
                "type": 16705,
                "signerPublicKey": SIGNER,
                "network": 152,
                "transactions": [{
                    "meta": {"height": "100", "aggregateHash": "AA", "index": 0},
                    "transaction": {
                        "type": 16724,
                        "signerPublicKey": SIGNER,
                        "network": 152,
                        "recipientAddress": alias_hex("alice"),
                        "mosaics": [{"id": "E74B99BA41F4AFEE", "amount": "1"}]
                    }
                }, {
                    "meta": {"height": "100", "aggregateHash": "AA", "index": 1},
                    "transaction": {
                        "type": 16721,
                        "signerPublicKey": SIGNER,
                        "network": 152,
                        "mosaicId": "72C0212E67A08BCE",
                        "referenceMosaicId": "0000000000000000"
                    }
                }]
            }
        }))
        .unwrap();

        let references = extract_references(&[dto], &FieldMap::rest());
        assert_eq!(references.addresses.len(), 1);
        assert_eq!(
            references.addresses[0].location,
            Some(Location { height: 100, primary_id: 3, secondary_id: 1 })
        );
        assert_eq!(references.mosaic_ids.len(), 2);
        assert_eq!(references.namespace_ids.len(), 1);
    }

    #[test]
    fn sdk_references_are_unlocated() {
        let recipient = UnresolvedAddress::from_namespace(
            NamespaceId::from_path("alice").unwrap(),
            NetworkType::TestNet,
        );
        let tx = SdkTransaction {
            network: NetworkType::TestNet,
            signer_public_key: SIGNER.parse::<PublicKey>().unwrap(),
            fee: 0,
            deadline: 0,
            body: SdkBody::Transfer {
                recipient_address: recipient,
                mosaics: vec![SdkMosaic {
                    mosaic_id: MosaicId::new(0x72C0_212E_67A0_8BCE).into(),
                    amount: 5,
                }],
                message: vec![],
            },
        };
        let references = extract_references(&[tx], &FieldMap::sdk());
        assert_eq!(references.addresses.len(), 1);
        assert_eq!(references.addresses[0].location, None);
        assert_eq!(references.mosaic_ids.len(), 1);
    }
}
