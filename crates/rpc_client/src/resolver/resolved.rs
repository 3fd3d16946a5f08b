// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// resolved.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{UnresolvedReference, UnresolvedReferences, Location};
use crate::models::{MosaicInfoDto, ResolutionStatementDto};
use crate::rest_client::RestClient;
use futures::future::join_all;
use std::collections::{BTreeMap, HashMap};
use symbol_core::transaction::MosaicFlags;
use symbol_core::{Address, MosaicId, NamespaceId, UnresolvedAddress, UnresolvedMosaicId};
use tracing::{debug, warn};

/// Namespaces nest at most three levels deep.
const MAX_NAMESPACE_DEPTH: usize = 3;

/// Mosaic properties needed to present amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicInfo {
    pub mosaic_id: MosaicId,
    pub divisibility: u8,
    pub supply: u64,
    pub owner_address: Option<Address>,
    pub flags: MosaicFlags,
    pub duration: u64,
    pub start_height: u64,
}

impl MosaicInfo {
    /// Minimal info, e.g. for the network currency known from configuration
    pub fn new(mosaic_id: MosaicId, divisibility: u8) -> Self {
        Self {
            mosaic_id,
            divisibility,
            supply: 0,
            owner_address: None,
            flags: MosaicFlags::default(),
            duration: 0,
            start_height: 0,
        }
    }

    fn from_dto(dto: &MosaicInfoDto) -> Option<Self> {
        Some(Self {
            mosaic_id: dto.id.parse().ok()?,
            divisibility: dto.divisibility,
            supply: dto.supply,
            owner_address: Address::from_raw_hex(&dto.owner_address).ok(),
            flags: MosaicFlags::from_bits(dto.flags),
            duration: dto.duration,
            start_height: dto.start_height,
        })
    }
}

/// Lookup maps produced by one resolution pass.
///
/// Built once per batch through [`ResolvedDataBuilder`] and read-only afterwards.
/// Lookups that failed are absent from the maps and listed in [`ResolvedData::failures`].
#[derive(Debug, Clone, Default)]
pub struct ResolvedData {
    mosaic_infos: HashMap<UnresolvedMosaicId, MosaicInfo>,
    mosaic_names: HashMap<UnresolvedMosaicId, String>,
    namespace_names: HashMap<NamespaceId, String>,
    addresses: HashMap<UnresolvedReference, Address>,
    failures: Vec<String>,
}

impl ResolvedData {
    pub fn builder() -> ResolvedDataBuilder {
        ResolvedDataBuilder::default()
    }

    /// Info keyed by the id as written in the transaction, alias or not
    pub fn mosaic_info(&self, id: &UnresolvedMosaicId) -> Option<&MosaicInfo> {
        self.mosaic_infos.get(id)
    }

    /// Real mosaic id behind `id`
    pub fn resolved_mosaic_id(&self, id: &UnresolvedMosaicId) -> Option<MosaicId> {
        self.mosaic_info(id)
            .map(|info| info.mosaic_id)
            .or_else(|| id.as_mosaic_id())
    }

    /// Display name of a mosaic: its namespace alias name when it has one
    pub fn mosaic_name(&self, id: &UnresolvedMosaicId) -> Option<&str> {
        self.mosaic_names
            .get(id)
            .map(String::as_str)
            .or_else(|| id.as_namespace_id().and_then(|ns| self.namespace_name(&ns)))
    }

    /// Full dotted name of a namespace
    pub fn namespace_name(&self, id: &NamespaceId) -> Option<&str> {
        self.namespace_names.get(id).map(String::as_str)
    }

    /// Address an alias pointed to at `location`, or currently when `location` is `None`
    pub fn address(&self, namespace_id: NamespaceId, location: Option<Location>) -> Option<Address> {
        self.addresses
            .get(&UnresolvedReference {
                namespace_id,
                location,
            })
            .copied()
    }

    /// Descriptions of lookups that failed
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Assembles a [`ResolvedData`]
#[derive(Debug, Default)]
pub struct ResolvedDataBuilder {
    data: ResolvedData,
}

impl ResolvedDataBuilder {
    pub fn mosaic_info(mut self, id: UnresolvedMosaicId, info: MosaicInfo) -> Self {
        self.data.mosaic_infos.insert(id, info);
        self
    }

    pub fn mosaic_name(mut self, id: UnresolvedMosaicId, name: impl Into<String>) -> Self {
        self.data.mosaic_names.insert(id, name.into());
        self
    }

    pub fn namespace_name(mut self, id: NamespaceId, name: impl Into<String>) -> Self {
        self.data.namespace_names.insert(id, name.into());
        self
    }

    pub fn address(mut self, reference: UnresolvedReference, address: Address) -> Self {
        self.data.addresses.insert(reference, address);
        self
    }

    pub fn failure(mut self, failure: impl Into<String>) -> Self {
        self.data.failures.push(failure.into());
        self
    }

    pub fn build(self) -> ResolvedData {
        self.data
    }
}

/// Values of one lookup family plus the failures met while fetching them
struct Partial<K, V> {
    values: Vec<(K, V)>,
    failures: Vec<String>,
}

impl<K, V> Default for Partial<K, V> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<K, V> Partial<K, V> {
    fn fail(&mut self, failure: String) {
        warn!(%failure, "reference resolution lookup failed");
        self.failures.push(failure);
    }
}

/// Resolves a batch of references against `client`.
///
/// Mosaic, namespace and address lookups run concurrently and settle
/// independently: a failing family is recorded in [`ResolvedData::failures`]
/// while the others are still returned.
pub async fn resolve(client: &RestClient, references: &UnresolvedReferences) -> ResolvedData {
    let (mosaics, namespaces, addresses) = futures::join!(
        resolve_mosaics(client, &references.mosaic_ids),
        resolve_namespace_names(client, &references.namespace_ids),
        resolve_addresses(client, &references.addresses),
    );
    let (infos, names) = mosaics;

    let mut builder = ResolvedData::builder();
    for (id, info) in infos.values {
        builder = builder.mosaic_info(id, info);
    }
    for (id, name) in names.values {
        builder = builder.mosaic_name(id, name);
    }
    for (id, name) in namespaces.values {
        builder = builder.namespace_name(id, name);
    }
    for (reference, address) in addresses.values {
        builder = builder.address(reference, address);
    }
    for failure in infos
        .failures
        .into_iter()
        .chain(names.failures)
        .chain(namespaces.failures)
        .chain(addresses.failures)
    {
        builder = builder.failure(failure);
    }

    let data = builder.build();
    debug!(
        mosaics = data.mosaic_infos.len(),
        namespaces = data.namespace_names.len(),
        addresses = data.addresses.len(),
        failures = data.failures.len(),
        "resolved references"
    );
    data
}

async fn resolve_mosaics(
    client: &RestClient,
    ids: &[UnresolvedMosaicId],
) -> (
    Partial<UnresolvedMosaicId, MosaicInfo>,
    Partial<UnresolvedMosaicId, String>,
) {
    let mut infos = Partial::default();
    let mut names = Partial::default();
    if ids.is_empty() {
        return (infos, names);
    }

    // Aliased mosaics are resolved against the current namespace state.
    let mut targets: Vec<(UnresolvedMosaicId, MosaicId)> = ids
        .iter()
        .filter_map(|id| id.as_mosaic_id().map(|real| (*id, real)))
        .collect();
    let aliases: Vec<(UnresolvedMosaicId, NamespaceId)> = ids
        .iter()
        .filter_map(|id| id.as_namespace_id().map(|ns| (*id, ns)))
        .collect();
    let lookups = join_all(aliases.iter().map(|(_, ns)| client.fetch_namespace(*ns))).await;
    for ((id, ns), lookup) in aliases.iter().zip(lookups) {
        match lookup {
            Ok(Some(namespace)) => match namespace.alias.mosaic().and_then(|m| m.parse().ok()) {
                Some(real) => targets.push((*id, real)),
                None => infos.fail(format!("namespace {ns} is not linked to a mosaic")),
            },
            Ok(None) => infos.fail(format!("namespace {ns} not found")),
            Err(error) => infos.fail(format!("namespace {ns}: {error}")),
        }
    }

    let mut real_ids: Vec<MosaicId> = targets.iter().map(|(_, real)| *real).collect();
    real_ids.sort();
    real_ids.dedup();

    let (info_result, name_result) = futures::join!(
        client.fetch_mosaic_infos(&real_ids),
        client.fetch_mosaic_names(&real_ids)
    );

    match info_result {
        Ok(dtos) => {
            let by_id: HashMap<MosaicId, MosaicInfo> = dtos
                .iter()
                .filter_map(MosaicInfo::from_dto)
                .map(|info| (info.mosaic_id, info))
                .collect();
            for (id, real) in &targets {
                if let Some(info) = by_id.get(real) {
                    infos.values.push((*id, info.clone()));
                }
            }
        }
        Err(error) => infos.fail(format!("mosaic infos: {error}")),
    }

    match name_result {
        Ok(entries) => {
            let by_id: HashMap<MosaicId, String> = entries
                .into_iter()
                .filter_map(|entry| {
                    let id = entry.mosaic_id.parse().ok()?;
                    let name = entry.names.into_iter().next()?;
                    Some((id, name))
                })
                .collect();
            for (id, real) in &targets {
                if let Some(name) = by_id.get(real) {
                    names.values.push((*id, name.clone()));
                }
            }
        }
        Err(error) => names.fail(format!("mosaic names: {error}")),
    }

    (infos, names)
}

async fn resolve_namespace_names(client: &RestClient, ids: &[NamespaceId]) -> Partial<NamespaceId, String> {
    let mut result = Partial::default();
    let mut levels: HashMap<NamespaceId, (String, Option<NamespaceId>)> = HashMap::new();
    let mut pending: Vec<NamespaceId> = ids.to_vec();

    for _ in 0..MAX_NAMESPACE_DEPTH {
        if pending.is_empty() {
            break;
        }
        match client.fetch_namespace_names(&pending).await {
            Ok(entries) => {
                for entry in entries {
                    let Ok(id) = entry.id.parse::<NamespaceId>() else {
                        continue;
                    };
                    let parent = entry
                        .parent_id
                        .as_deref()
                        .and_then(|parent| parent.parse::<NamespaceId>().ok())
                        .filter(|parent| parent.value() != 0);
                    levels.insert(id, (entry.name, parent));
                }
            }
            Err(error) => {
                result.fail(format!("namespace names: {error}"));
                break;
            }
        }
        let mut parents: Vec<NamespaceId> = levels
            .values()
            .filter_map(|(_, parent)| *parent)
            .filter(|parent| !levels.contains_key(parent))
            .collect();
        parents.sort();
        parents.dedup();
        pending = parents;
    }

    for id in ids {
        let mut parts = Vec::new();
        let mut cursor = Some(*id);
        while let Some(current) = cursor {
            match levels.get(&current) {
                Some((name, parent)) => {
                    parts.push(name.as_str());
                    cursor = *parent;
                }
                None => {
                    parts.clear();
                    break;
                }
            }
            if parts.len() > MAX_NAMESPACE_DEPTH {
                parts.clear();
                break;
            }
        }
        if parts.is_empty() {
            continue;
        }
        parts.reverse();
        result.values.push((*id, parts.join(".")));
    }

    result
}

/// The entry applying at `location`: the last one whose source does not follow it.
fn select_resolution(statement: &ResolutionStatementDto, location: &Location) -> Option<Address> {
    statement
        .resolution_entries
        .iter()
        .filter(|entry| (entry.source.primary_id, entry.source.secondary_id) <= location.source())
        .max_by_key(|entry| (entry.source.primary_id, entry.source.secondary_id))
        .and_then(|entry| Address::from_raw_hex(&entry.resolved).ok())
}

async fn resolve_addresses(
    client: &RestClient,
    references: &[UnresolvedReference],
) -> Partial<UnresolvedReference, Address> {
    let mut result = Partial::default();

    let mut by_height: BTreeMap<u64, Vec<&UnresolvedReference>> = BTreeMap::new();
    let mut current = Vec::new();
    for reference in references {
        match reference.location {
            Some(location) => by_height.entry(location.height).or_default().push(reference),
            None => current.push(reference),
        }
    }

    let heights: Vec<u64> = by_height.keys().copied().collect();
    let (statements, namespaces) = futures::join!(
        join_all(heights.iter().map(|height| client.fetch_address_resolutions(*height))),
        join_all(current.iter().map(|reference| client.fetch_namespace(reference.namespace_id)))
    );

    for (height, lookup) in heights.iter().zip(statements) {
        let statements = match lookup {
            Ok(statements) => statements,
            Err(error) => {
                result.fail(format!("address resolutions at height {height}: {error}"));
                continue;
            }
        };
        for reference in by_height.get(height).into_iter().flatten() {
            let Some(location) = reference.location else {
                continue;
            };
            let resolved = statements
                .iter()
                .filter(|statement| {
                    UnresolvedAddress::from_raw_hex(&statement.unresolved)
                        .ok()
                        .and_then(|unresolved| unresolved.namespace_id())
                        == Some(reference.namespace_id)
                })
                .find_map(|statement| select_resolution(statement, &location));
            match resolved {
                Some(address) => result.values.push((**reference, address)),
                None => result.fail(format!(
                    "no resolution of {} at height {height}",
                    reference.namespace_id
                )),
            }
        }
    }

    for (reference, lookup) in current.iter().zip(namespaces) {
        let namespace_id = reference.namespace_id;
        match lookup {
            Ok(Some(namespace)) => {
                match namespace.alias.address().and_then(|hex| Address::from_raw_hex(hex).ok()) {
                    Some(address) => result.values.push((**reference, address)),
                    None => result.fail(format!("namespace {namespace_id} is not linked to an address")),
                }
            }
            Ok(None) => result.fail(format!("namespace {namespace_id} not found")),
            Err(error) => result.fail(format!("namespace {namespace_id}: {error}")),
        }
    }

    result
}
