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

//! Transaction Codec.
//!
//! Maps REST DTOs and SDK objects to the domain [`Transaction`] model and
//! domain transactions back to SDK objects. Every direction is one exhaustive
//! match over the transaction kinds; kinds the toolkit does not know decode to
//! [`symbol_core::TransactionBody::Base`].
//!
//! Decoding reads resolved addresses, mosaic divisibilities and names from a
//! [`ResolvedData`] built beforehand by the resolver. Addresses that are
//! namespace aliases but have no resolution fail with
//! [`ProtocolError::MissingNamespaceAlias`].

mod dto;
mod sdk;
mod to_sdk;

pub use dto::dto_to_domain;
pub use sdk::sdk_to_domain;
pub use to_sdk::domain_to_sdk;

use crate::resolver::{Location, ResolvedData};
use crate::{ProtocolError, Result};
use rust_decimal::Decimal;
use symbol_config::NetworkProperties;
use symbol_core::transaction::{MosaicAmount, MosaicRef, NamespaceRef};
use symbol_core::{
    sum_at_divisibility, to_relative, Address, Deadline, NamespaceId, Transaction, UnresolvedAddress,
    UnresolvedMosaicId,
};

/// Context shared by every conversion of one batch
#[derive(Debug, Clone, Copy)]
pub struct CodecConfig<'a> {
    pub properties: &'a NetworkProperties,
    pub resolved: &'a ResolvedData,
    /// Account whose point of view signs transfer amounts
    pub current_account: Option<&'a Address>,
    /// Chain position of the transaction being converted
    pub location: Option<Location>,
    /// Inner transactions carry neither fee nor deadline
    pub embedded: bool,
}

impl<'a> CodecConfig<'a> {
    pub fn new(properties: &'a NetworkProperties, resolved: &'a ResolvedData) -> Self {
        Self {
            properties,
            resolved,
            current_account: None,
            location: None,
            embedded: false,
        }
    }

    pub fn with_current_account(mut self, account: &'a Address) -> Self {
        self.current_account = Some(account);
        self
    }

    pub fn at(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    /// Context for the inner transaction at `index` of an aggregate converted with `self`
    pub fn inner(&self, index: u32) -> Self {
        Self {
            location: self.location.map(|location| location.inner(index)),
            embedded: true,
            ..*self
        }
    }

    pub(crate) fn currency_divisibility(&self) -> u8 {
        self.properties.network_currency.divisibility
    }

    pub(crate) fn fee(&self, absolute: u64) -> Option<Decimal> {
        (!self.embedded).then(|| to_relative(absolute, self.currency_divisibility()))
    }

    pub(crate) fn deadline(&self, timestamp: u64) -> Option<Deadline> {
        (!self.embedded)
            .then(|| Deadline::from_network_time(timestamp, self.properties.epoch_adjustment))
    }

    /// Whether `id` is the network currency, directly or through its namespace
    pub(crate) fn is_currency(&self, id: &UnresolvedMosaicId) -> bool {
        let currency = &self.properties.network_currency;
        if id.to_hex().eq_ignore_ascii_case(&currency.mosaic_id) {
            return true;
        }
        if let Some(resolved) = self.resolved.resolved_mosaic_id(id) {
            if resolved.to_hex().eq_ignore_ascii_case(&currency.mosaic_id) {
                return true;
            }
        }
        match (id.as_namespace_id(), NamespaceId::from_path(&currency.namespace_name)) {
            (Some(namespace), Ok(currency_namespace)) => namespace == currency_namespace,
            _ => false,
        }
    }

    fn divisibility_of(&self, id: &UnresolvedMosaicId) -> u8 {
        match self.resolved.mosaic_info(id) {
            Some(info) => info.divisibility,
            None if self.is_currency(id) => self.currency_divisibility(),
            None => 0,
        }
    }

    pub(crate) fn mosaic_amount(&self, id: UnresolvedMosaicId, absolute: u64) -> MosaicAmount {
        let divisibility = self.divisibility_of(&id);
        MosaicAmount {
            id,
            mosaic_id: self.resolved.resolved_mosaic_id(&id),
            name: self.mosaic_name(&id),
            amount: to_relative(absolute, divisibility),
            divisibility,
        }
    }

    pub(crate) fn mosaic_ref(&self, id: UnresolvedMosaicId) -> MosaicRef {
        MosaicRef {
            id,
            mosaic_id: self.resolved.resolved_mosaic_id(&id),
            name: self.mosaic_name(&id),
        }
    }

    fn mosaic_name(&self, id: &UnresolvedMosaicId) -> Option<String> {
        self.resolved.mosaic_name(id).map(str::to_owned).or_else(|| {
            self.is_currency(id)
                .then(|| self.properties.network_currency.namespace_name.clone())
        })
    }

    pub(crate) fn namespace_ref(&self, id: NamespaceId) -> NamespaceRef {
        NamespaceRef {
            id,
            name: self.resolved.namespace_name(&id).map(str::to_owned),
        }
    }

    /// Real address behind `address`, looked up at this context's location
    pub(crate) fn resolve_address(&self, address: &UnresolvedAddress) -> Result<Address> {
        if let Some(plain) = address.address() {
            return Ok(plain);
        }
        let namespace_id = address.namespace_id().ok_or_else(|| {
            ProtocolError::MissingNamespaceAlias {
                namespace_id: address.to_raw_hex(),
            }
        })?;
        self.resolved
            .address(namespace_id, self.location)
            .ok_or_else(|| {
                ProtocolError::MissingNamespaceAlias {
                    namespace_id: namespace_id.to_hex(),
                }
                .into()
            })
    }

    pub(crate) fn resolve_addresses(&self, addresses: &[UnresolvedAddress]) -> Result<Vec<Address>> {
        addresses.iter().map(|address| self.resolve_address(address)).collect()
    }

    /// Signed network currency amount of a transfer seen from the current account.
    ///
    /// Incoming only is positive, outgoing only is negative, a self-transfer or
    /// a transfer not involving the account is zero.
    pub(crate) fn transfer_amount(&self, signer: &Address, recipient: &Address, mosaics: &[MosaicAmount]) -> Decimal {
        let Some(account) = self.current_account else {
            return Decimal::ZERO;
        };
        let incoming = recipient == account;
        let outgoing = signer == account;
        let total = sum_at_divisibility(
            mosaics
                .iter()
                .filter(|mosaic| self.is_currency(&mosaic.id))
                .map(|mosaic| mosaic.amount),
            self.currency_divisibility(),
        );
        match (incoming, outgoing) {
            (true, false) => total,
            (false, true) => -total,
            _ => Decimal::ZERO,
        }
    }

    /// Exact sum of inner transaction amounts at the currency divisibility
    pub(crate) fn aggregate_amount(&self, inner: &[Transaction]) -> Decimal {
        sum_at_divisibility(inner.iter().map(Transaction::amount), self.currency_divisibility())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::resolver::MosaicInfo;
    use symbol_core::{MosaicId, NetworkType, PublicKey};
    use url::Url;

    pub const CURRENCY: u64 = 0x72C0_212E_67A0_8BCE;

    pub fn properties() -> NetworkProperties {
        let url = Url::parse("http://localhost:3000").unwrap();
        NetworkProperties::for_network(NetworkType::TestNet, url).unwrap()
    }

    pub fn account(seed: u8) -> (PublicKey, Address) {
        let key = PublicKey::from_bytes([seed; 32]);
        (key, Address::from_public_key(&key, NetworkType::TestNet))
    }

    pub fn resolved() -> ResolvedData {
        let currency = properties().network_currency.mosaic_id.parse::<MosaicId>().unwrap();
        ResolvedData::builder()
            .mosaic_info(currency.into(), MosaicInfo::new(currency, 6))
            .mosaic_name(currency.into(), "symbol.xym")
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use std::str::FromStr;
    use symbol_core::{MosaicId, NetworkType};

    #[test]
    fn transfer_amount_sign_follows_direction() {
        let properties = properties();
        let resolved = resolved();
        let (_, alice) = account(1);
        let (_, bob) = account(2);
        let config = CodecConfig::new(&properties, &resolved).with_current_account(&alice);
        let currency = properties.network_currency.mosaic_id.parse::<MosaicId>().unwrap();
        let mosaics = vec![config.mosaic_amount(currency.into(), 1_500_000)];

        assert_eq!(config.transfer_amount(&bob, &alice, &mosaics), Decimal::from_str("1.500000").unwrap());
        assert_eq!(config.transfer_amount(&alice, &bob, &mosaics), Decimal::from_str("-1.500000").unwrap());
        assert_eq!(config.transfer_amount(&alice, &alice, &mosaics), Decimal::ZERO);
        assert_eq!(config.transfer_amount(&bob, &bob, &mosaics), Decimal::ZERO);
    }

    #[test]
    fn unresolved_alias_is_a_protocol_error() {
        let properties = properties();
        let resolved = resolved();
        let config = CodecConfig::new(&properties, &resolved);
        let alias = UnresolvedAddress::from_namespace(NamespaceId::from_path("bob").unwrap(), NetworkType::TestNet);

        let error = config.resolve_address(&alias).unwrap_err();
        assert!(matches!(
            error,
            crate::ClientError::Protocol(ProtocolError::MissingNamespaceAlias { .. })
        ));
    }

    #[test]
    fn inner_context_is_embedded_and_located() {
        let properties = properties();
        let resolved = resolved();
        let config = CodecConfig::new(&properties, &resolved).at(Some(Location::top_level(7, 1)));
        let inner = config.inner(3);

        assert!(inner.embedded);
        assert_eq!(inner.location, Some(Location { height: 7, primary_id: 2, secondary_id: 4 }));
        assert_eq!(inner.fee(100), None);
        assert_eq!(config.fee(100), Some(Decimal::from_str("0.000100").unwrap()));
    }
}
