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

//! Reference Resolver.
//!
//! Scans a batch of raw transactions (REST DTOs or SDK objects), collects the
//! mosaic ids, namespace ids and aliased addresses they mention, and resolves
//! them against a node in one batched, deduplicated pass.
//!
//! Which fields carry references is described per transaction type by a
//! [`FieldMap`]. Raw shapes plug in through [`ReferenceSource`], which is where
//! REST hex strings and SDK typed ids are normalized to the same values.

mod resolved;
mod source;

pub use resolved::{resolve, MosaicInfo, ResolvedData, ResolvedDataBuilder};

use std::collections::{HashMap, HashSet};
use symbol_core::{NamespaceId, TransactionType, UnresolvedAddress, UnresolvedMosaicId};
use tracing::debug;

/// Position of a transaction in the chain, as used by resolution receipts.
///
/// Top-level transactions have `primary_id = index + 1` and `secondary_id = 0`;
/// inner transactions keep the parent's primary id and use their own
/// `index + 1` as secondary id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub height: u64,
    pub primary_id: u32,
    pub secondary_id: u32,
}

impl Location {
    pub fn top_level(height: u64, index: u32) -> Self {
        Self {
            height,
            primary_id: index.saturating_add(1),
            secondary_id: 0,
        }
    }

    /// Location of the inner transaction at `index` within this aggregate
    pub fn inner(&self, index: u32) -> Self {
        Self {
            height: self.height,
            primary_id: self.primary_id,
            secondary_id: index.saturating_add(1),
        }
    }

    /// `(primary, secondary)` pair comparable with receipt sources
    pub fn source(&self) -> (u32, u32) {
        (self.primary_id, self.secondary_id)
    }
}

/// Namespace alias standing in for an address, optionally pinned to a chain position.
///
/// References without a location resolve against current chain state and are
/// never merged with located references of the same namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnresolvedReference {
    pub namespace_id: NamespaceId,
    pub location: Option<Location>,
}

/// How a mapped field holds its references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    Address,
    AddressArray,
    Mosaic,
    MosaicArray,
    Namespace,
}

/// Normalized value of a mapped field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Addresses(Vec<UnresolvedAddress>),
    Mosaics(Vec<UnresolvedMosaicId>),
    Namespace(NamespaceId),
}

/// Per transaction type, the fields that hold references
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: HashMap<TransactionType, Vec<(&'static str, FieldMode)>>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the entry of `kind`
    pub fn with(mut self, kind: TransactionType, field: &'static str, mode: FieldMode) -> Self {
        self.fields.entry(kind).or_default().push((field, mode));
        self
    }

    pub fn fields(&self, kind: TransactionType) -> Option<&[(&'static str, FieldMode)]> {
        self.fields.get(&kind).map(Vec::as_slice)
    }

    /// Field names of REST transaction DTOs
    pub fn rest() -> Self {
        use FieldMode::*;
        use TransactionType as T;

        Self::new()
            .with(T::Transfer, "recipientAddress", Address)
            .with(T::Transfer, "mosaics", MosaicArray)
            .with(T::NamespaceRegistration, "id", Namespace)
            .with(T::NamespaceRegistration, "parentId", Namespace)
            .with(T::AddressAlias, "namespaceId", Namespace)
            .with(T::MosaicAlias, "namespaceId", Namespace)
            .with(T::MosaicAlias, "mosaicId", Mosaic)
            .with(T::MosaicDefinition, "id", Mosaic)
            .with(T::MosaicSupplyChange, "mosaicId", Mosaic)
            .with(T::MosaicSupplyRevocation, "sourceAddress", Address)
            .with(T::MosaicSupplyRevocation, "mosaicId", Mosaic)
            .with(T::MultisigAccountModification, "addressAdditions", AddressArray)
            .with(T::MultisigAccountModification, "addressDeletions", AddressArray)
            .with(T::HashLock, "mosaicId", Mosaic)
            .with(T::SecretLock, "recipientAddress", Address)
            .with(T::SecretLock, "mosaicId", Mosaic)
            .with(T::SecretProof, "recipientAddress", Address)
            .with(T::AccountAddressRestriction, "restrictionAdditions", AddressArray)
            .with(T::AccountAddressRestriction, "restrictionDeletions", AddressArray)
            .with(T::AccountMosaicRestriction, "restrictionAdditions", MosaicArray)
            .with(T::AccountMosaicRestriction, "restrictionDeletions", MosaicArray)
            .with(T::MosaicAddressRestriction, "mosaicId", Mosaic)
            .with(T::MosaicAddressRestriction, "targetAddress", Address)
            .with(T::MosaicGlobalRestriction, "mosaicId", Mosaic)
            .with(T::MosaicGlobalRestriction, "referenceMosaicId", Mosaic)
            .with(T::AccountMetadata, "targetAddress", Address)
            .with(T::MosaicMetadata, "targetAddress", Address)
            .with(T::MosaicMetadata, "targetMosaicId", Mosaic)
            .with(T::NamespaceMetadata, "targetAddress", Address)
            .with(T::NamespaceMetadata, "targetNamespaceId", Namespace)
    }

    /// Field names of SDK transaction objects
    pub fn sdk() -> Self {
        use FieldMode::*;
        use TransactionType as T;

        Self::new()
            .with(T::Transfer, "recipient_address", Address)
            .with(T::Transfer, "mosaics", MosaicArray)
            .with(T::NamespaceRegistration, "id", Namespace)
            .with(T::NamespaceRegistration, "parent_id", Namespace)
            .with(T::AddressAlias, "namespace_id", Namespace)
            .with(T::MosaicAlias, "namespace_id", Namespace)
            .with(T::MosaicAlias, "mosaic_id", Mosaic)
            .with(T::MosaicDefinition, "id", Mosaic)
            .with(T::MosaicSupplyChange, "mosaic_id", Mosaic)
            .with(T::MosaicSupplyRevocation, "source_address", Address)
            .with(T::MosaicSupplyRevocation, "mosaic", Mosaic)
            .with(T::MultisigAccountModification, "address_additions", AddressArray)
            .with(T::MultisigAccountModification, "address_deletions", AddressArray)
            .with(T::HashLock, "mosaic", Mosaic)
            .with(T::SecretLock, "recipient_address", Address)
            .with(T::SecretLock, "mosaic", Mosaic)
            .with(T::SecretProof, "recipient_address", Address)
            .with(T::AccountAddressRestriction, "restriction_additions", AddressArray)
            .with(T::AccountAddressRestriction, "restriction_deletions", AddressArray)
            .with(T::AccountMosaicRestriction, "restriction_additions", MosaicArray)
            .with(T::AccountMosaicRestriction, "restriction_deletions", MosaicArray)
            .with(T::MosaicAddressRestriction, "mosaic_id", Mosaic)
            .with(T::MosaicAddressRestriction, "target_address", Address)
            .with(T::MosaicGlobalRestriction, "mosaic_id", Mosaic)
            .with(T::MosaicGlobalRestriction, "reference_mosaic_id", Mosaic)
            .with(T::AccountMetadata, "target_address", Address)
            .with(T::MosaicMetadata, "target_address", Address)
            .with(T::MosaicMetadata, "target_mosaic_id", Mosaic)
            .with(T::NamespaceMetadata, "target_address", Address)
            .with(T::NamespaceMetadata, "target_namespace_id", Namespace)
    }
}

/// Raw transaction shape the resolver can scan
pub trait ReferenceSource: Sized {
    /// Kind of the transaction, `None` for unknown type codes
    fn transaction_type(&self) -> Option<TransactionType>;

    /// Block height, `None` while unconfirmed
    fn height(&self) -> Option<u64>;

    /// Index within the block, or within the parent for inner transactions
    fn index(&self) -> Option<u32>;

    /// Inner transactions of aggregates, empty otherwise
    fn inner_transactions(&self) -> &[Self];

    /// Normalized value of `field` read according to `mode`, `None` when absent
    fn field(&self, field: &str, mode: FieldMode) -> Option<FieldValue>;
}

/// Location of a top-level transaction
pub fn location_of<S: ReferenceSource>(transaction: &S) -> Option<Location> {
    match (transaction.height(), transaction.index()) {
        (Some(height), Some(index)) if height > 0 => Some(Location::top_level(height, index)),
        _ => None,
    }
}

/// Location of the inner transaction at `position`, composed from its parent's location
pub fn inner_location_of<S: ReferenceSource>(
    parent: Option<Location>,
    inner: &S,
    position: usize,
) -> Option<Location> {
    let index = inner
        .index()
        .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX));
    parent.map(|location| location.inner(index))
}

/// Deduplicated references found in a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedReferences {
    pub mosaic_ids: Vec<UnresolvedMosaicId>,
    pub namespace_ids: Vec<NamespaceId>,
    pub addresses: Vec<UnresolvedReference>,
}

impl UnresolvedReferences {
    pub fn is_empty(&self) -> bool {
        self.mosaic_ids.is_empty() && self.namespace_ids.is_empty() && self.addresses.is_empty()
    }
}

#[derive(Default)]
struct Collector {
    references: UnresolvedReferences,
    seen_mosaics: HashSet<UnresolvedMosaicId>,
    seen_namespaces: HashSet<NamespaceId>,
    seen_addresses: HashSet<UnresolvedReference>,
}

impl Collector {
    fn mosaic(&mut self, id: UnresolvedMosaicId) {
        if self.seen_mosaics.insert(id) {
            self.references.mosaic_ids.push(id);
        }
        if let Some(namespace_id) = id.as_namespace_id() {
            self.namespace(namespace_id);
        }
    }

    fn namespace(&mut self, id: NamespaceId) {
        if self.seen_namespaces.insert(id) {
            self.references.namespace_ids.push(id);
        }
    }

    fn address(&mut self, address: UnresolvedAddress, location: Option<Location>) {
        // Plain addresses need no lookup.
        let Some(namespace_id) = address.namespace_id() else {
            return;
        };
        let reference = UnresolvedReference {
            namespace_id,
            location,
        };
        if self.seen_addresses.insert(reference) {
            self.references.addresses.push(reference);
        }
    }

    fn scan<S: ReferenceSource>(&mut self, transaction: &S, location: Option<Location>, map: &FieldMap) {
        for (position, inner) in transaction.inner_transactions().iter().enumerate() {
            let inner_location = inner_location_of(location, inner, position);
            self.scan(inner, inner_location, map);
        }

        let Some(kind) = transaction.transaction_type() else {
            return;
        };
        let Some(fields) = map.fields(kind) else {
            return;
        };

        for (name, mode) in fields {
            match (mode, transaction.field(name, *mode)) {
                (FieldMode::Address | FieldMode::AddressArray, Some(FieldValue::Addresses(addresses))) => {
                    for address in addresses {
                        self.address(address, location);
                    }
                }
                (FieldMode::Mosaic | FieldMode::MosaicArray, Some(FieldValue::Mosaics(mosaics))) => {
                    for mosaic in mosaics {
                        self.mosaic(mosaic);
                    }
                }
                (FieldMode::Namespace, Some(FieldValue::Namespace(namespace_id))) => {
                    self.namespace(namespace_id);
                }
                (_, value) => {
                    // Missing or mistyped fields contribute no reference.
                    debug!(%kind, field = %name, ?mode, found = value.is_some(), "no reference in mapped field");
                }
            }
        }
    }
}

/// Collects the references of a batch of top-level transactions
pub fn extract_references<S: ReferenceSource>(transactions: &[S], map: &FieldMap) -> UnresolvedReferences {
    let mut collector = Collector::default();
    for transaction in transactions {
        collector.scan(transaction, location_of(transaction), map);
    }
    collector.references
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbol_core::{MosaicId, NetworkType};

    struct Fake {
        kind: Option<TransactionType>,
        height: Option<u64>,
        index: Option<u32>,
        inner: Vec<Fake>,
        addresses: Vec<UnresolvedAddress>,
        mosaics: Vec<UnresolvedMosaicId>,
    }

    impl Fake {
        fn transfer(height: Option<u64>, index: u32, recipient: UnresolvedAddress) -> Self {
            Self {
                kind: Some(TransactionType::Transfer),
                height,
                index: Some(index),
                inner: vec![],
                addresses: vec![recipient],
                mosaics: vec![],
            }
        }
    }

    impl ReferenceSource for Fake {
        fn transaction_type(&self) -> Option<TransactionType> {
            self.kind
        }

        fn height(&self) -> Option<u64> {
            self.height
        }

        fn index(&self) -> Option<u32> {
            self.index
        }

        fn inner_transactions(&self) -> &[Self] {
            &self.inner
        }

        fn field(&self, field: &str, _mode: FieldMode) -> Option<FieldValue> {
            match field {
                "recipient" => Some(FieldValue::Addresses(self.addresses.clone())),
                "mosaics" => Some(FieldValue::Mosaics(self.mosaics.clone())),
                _ => None,
            }
        }
    }

    fn map() -> FieldMap {
        FieldMap::new()
            .with(TransactionType::Transfer, "recipient", FieldMode::Address)
            .with(TransactionType::Transfer, "mosaics", FieldMode::MosaicArray)
    }

    fn alias(name: &str) -> UnresolvedAddress {
        UnresolvedAddress::from_namespace(NamespaceId::from_path(name).unwrap(), NetworkType::TestNet)
    }

    #[test]
    fn last_index_saturates_instead_of_wrapping() {
        let parent = Location::top_level(9, u32::MAX);
        assert_eq!(parent.source(), (u32::MAX, 0));
        assert_eq!(parent.inner(u32::MAX).source(), (u32::MAX, u32::MAX));
        assert_eq!(Location::top_level(9, 0).inner(2).source(), (1, 3));
    }

    #[test]
    fn same_alias_at_same_location_collapses() {
        let txs = vec![
            Fake::transfer(Some(10), 0, alias("alice")),
            Fake::transfer(Some(10), 0, alias("alice")),
            Fake::transfer(Some(10), 1, alias("alice")),
            Fake::transfer(None, 0, alias("alice")),
            Fake::transfer(None, 3, alias("alice")),
        ];
        let references = extract_references(&txs, &map());

        assert_eq!(references.addresses.len(), 3);
        let unlocated: Vec<_> = references
            .addresses
            .iter()
            .filter(|reference| reference.location.is_none())
            .collect();
        assert_eq!(unlocated.len(), 1);
        assert!(references
            .addresses
            .contains(&UnresolvedReference {
                namespace_id: NamespaceId::from_path("alice").unwrap(),
                location: Some(Location::top_level(10, 1)),
            }));
    }

    #[test]
    fn inner_transactions_are_located_under_parent() {
        let mut parent = Fake::transfer(Some(7), 4, alias("bob"));
        parent.kind = Some(TransactionType::AggregateComplete);
        parent.inner = vec![
            Fake::transfer(Some(7), 0, alias("bob")),
            Fake::transfer(Some(7), 1, alias("carol")),
        ];
        let references = extract_references(&[parent], &map());

        let locations: Vec<_> = references.addresses.iter().map(|r| r.location.unwrap()).collect();
        assert_eq!(
            locations,
            vec![
                Location { height: 7, primary_id: 5, secondary_id: 1 },
                Location { height: 7, primary_id: 5, secondary_id: 2 },
            ]
        );
    }

    #[test]
    fn mosaics_and_alias_namespaces_are_unique() {
        let currency = UnresolvedMosaicId::from(MosaicId::new(0x72C0_212E_67A0_8BCE));
        let xym = UnresolvedMosaicId::from(NamespaceId::from_path("symbol.xym").unwrap());
        let mut first = Fake::transfer(None, 0, alias("alice"));
        first.mosaics = vec![currency, xym, currency];
        let mut second = Fake::transfer(None, 1, alias("alice"));
        second.mosaics = vec![xym];

        let references = extract_references(&[first, second], &map());
        assert_eq!(references.mosaic_ids, vec![currency, xym]);
        assert_eq!(references.namespace_ids, vec![xym.as_namespace_id().unwrap()]);
    }

    #[test]
    fn plain_addresses_need_no_lookup() {
        let key = "C5FB65CB902623D93DF2E682FFB13F99D50FAC24D5FF2A42F68C7CA1772FE8A0".parse().unwrap();
        let plain = symbol_core::Address::from_public_key(&key, NetworkType::TestNet);
        let references = extract_references(&[Fake::transfer(Some(1), 0, plain.into())], &map());
        assert!(references.is_empty());
    }

    #[test]
    fn unknown_fields_degrade_to_no_reference() {
        let malformed = FieldMap::new().with(TransactionType::Transfer, "doesNotExist", FieldMode::Address);
        let references = extract_references(&[Fake::transfer(Some(1), 0, alias("alice"))], &malformed);
        assert!(references.is_empty());

        let unmapped = FieldMap::new();
        assert!(extract_references(&[Fake::transfer(Some(1), 0, alias("alice"))], &unmapped).is_empty());
    }
}
