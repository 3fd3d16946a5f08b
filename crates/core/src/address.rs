// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// address.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::ids::{NamespaceId, PublicKey};
use crate::{CoreError, Result};
use data_encoding::BASE32_NOPAD;
use ripemd::Ripemd160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;
use symbol_config::{NetworkType, ADDRESS_SIZE};

const CHECKSUM_SIZE: usize = 3;
const PLAIN_ADDRESS_LENGTH: usize = 39;

/// Decoded Symbol account address.
///
/// Displayed in its 39-character base32 plain form; REST exchanges the
/// 48-character hex form of the same 24 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Derives the address of a public key on a network
    pub fn from_public_key(public_key: &PublicKey, network: NetworkType) -> Self {
        let sha = Sha3_256::digest(public_key.as_bytes());
        let ripemd = Ripemd160::digest(sha);

        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = network.identifier();
        bytes[1..21].copy_from_slice(&ripemd);
        let checksum = Sha3_256::digest(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum[..CHECKSUM_SIZE]);
        Self(bytes)
    }

    /// Wraps decoded bytes after verifying the checksum
    pub fn from_bytes(bytes: [u8; ADDRESS_SIZE]) -> Result<Self> {
        let checksum = Sha3_256::digest(&bytes[..21]);
        if checksum[..CHECKSUM_SIZE] != bytes[21..] {
            return Err(CoreError::InvalidAddress(hex::encode_upper(bytes)));
        }
        if NetworkType::from_identifier(bytes[0]).is_none() {
            return Err(CoreError::InvalidAddress(hex::encode_upper(bytes)));
        }
        Ok(Self(bytes))
    }

    /// Parses the 48-character hex form
    pub fn from_raw_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim()).map_err(|_| CoreError::InvalidAddress(text.to_string()))?;
        let bytes: [u8; ADDRESS_SIZE] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidAddress(text.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// Parses the 39-character base32 form (dashes are ignored)
    pub fn from_plain(text: &str) -> Result<Self> {
        let cleaned: String = text.trim().chars().filter(|c| *c != '-').collect::<String>().to_uppercase();
        if cleaned.len() != PLAIN_ADDRESS_LENGTH {
            return Err(CoreError::InvalidAddress(text.to_string()));
        }

        let decoded = BASE32_NOPAD
            .decode(cleaned.as_bytes())
            .map_err(|_| CoreError::InvalidAddress(text.to_string()))?;
        let bytes: [u8; ADDRESS_SIZE] = decoded
            .try_into()
            .map_err(|_| CoreError::InvalidAddress(text.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// Raw decoded bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Network the address belongs to
    pub fn network(&self) -> Option<NetworkType> {
        NetworkType::from_identifier(self.0[0])
    }

    /// 39-character base32 form
    pub fn plain(&self) -> String {
        BASE32_NOPAD.encode(&self.0)
    }

    /// 48-character uppercase hex form
    pub fn to_raw_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.plain())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

impl FromStr for Address {
    type Err = CoreError;

    /// Accepts either the plain base32 form or the raw hex form
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().len() == ADDRESS_SIZE * 2 {
            Self::from_raw_hex(s)
        } else {
            Self::from_plain(s)
        }
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.plain())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Address field as written on chain: either a real address or a namespace alias.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnresolvedAddress([u8; ADDRESS_SIZE]);

impl UnresolvedAddress {
    /// Wraps raw bytes without validation
    pub const fn from_bytes(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Encodes a namespace alias for a network
    pub fn from_namespace(namespace_id: NamespaceId, network: NetworkType) -> Self {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = network.identifier() | 0x01;
        bytes[1..9].copy_from_slice(&namespace_id.value().to_le_bytes());
        Self(bytes)
    }

    /// Parses the 48-character hex form used by REST
    pub fn from_raw_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim()).map_err(|_| CoreError::InvalidAddress(text.to_string()))?;
        let bytes: [u8; ADDRESS_SIZE] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidAddress(text.to_string()))?;
        Ok(Self(bytes))
    }

    /// Whether bit 0 of the network byte marks this as an alias
    pub fn is_alias(&self) -> bool {
        self.0[0] & 0x01 == 0x01
    }

    /// The aliased namespace, if this is an alias
    pub fn namespace_id(&self) -> Option<NamespaceId> {
        if !self.is_alias() {
            return None;
        }
        let mut id = [0u8; 8];
        id.copy_from_slice(&self.0[1..9]);
        Some(NamespaceId::new(u64::from_le_bytes(id)))
    }

    /// The real address, if this is not an alias and the checksum holds
    pub fn address(&self) -> Option<Address> {
        if self.is_alias() {
            return None;
        }
        Address::from_bytes(self.0).ok()
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// 48-character uppercase hex form
    pub fn to_raw_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl From<Address> for UnresolvedAddress {
    fn from(address: Address) -> Self {
        Self(address.0)
    }
}

impl fmt::Debug for UnresolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.namespace_id(), self.address()) {
            (Some(namespace_id), _) => write!(f, "UnresolvedAddress(alias {namespace_id})"),
            (None, Some(address)) => write!(f, "UnresolvedAddress({address})"),
            (None, None) => write!(f, "UnresolvedAddress({})", self.to_raw_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> PublicKey {
        "C5FB65CB902623D93DF2E682FFB13F99D50FAC24D5FF2A42F68C7CA1772FE8A0"
            .parse()
            .unwrap()
    }

    #[test]
    fn derived_addresses_use_network_prefix() {
        let mainnet = Address::from_public_key(&key(), NetworkType::MainNet);
        let testnet = Address::from_public_key(&key(), NetworkType::TestNet);
        assert!(mainnet.plain().starts_with('N'));
        assert!(testnet.plain().starts_with('T'));
        assert_eq!(mainnet.plain().len(), 39);
        assert_eq!(mainnet.network(), Some(NetworkType::MainNet));
    }

    #[test]
    fn plain_and_raw_forms_round_trip() {
        let address = Address::from_public_key(&key(), NetworkType::TestNet);
        assert_eq!(Address::from_plain(&address.plain()).unwrap(), address);
        assert_eq!(Address::from_raw_hex(&address.to_raw_hex()).unwrap(), address);
        assert_eq!(address.to_raw_hex().parse::<Address>().unwrap(), address);
    }

    #[test]
    fn checksum_is_enforced() {
        let address = Address::from_public_key(&key(), NetworkType::MainNet);
        let mut bytes = *address.as_bytes();
        bytes[23] ^= 0xFF;
        assert!(Address::from_bytes(bytes).is_err());
    }

    #[test]
    fn plain_form_rejects_foreign_alphabet() {
        let plain = Address::from_public_key(&key(), NetworkType::TestNet).plain();
        let dashed = plain
            .as_bytes()
            .chunks(6)
            .map(|chunk| std::str::from_utf8(chunk).unwrap())
            .collect::<Vec<_>>()
            .join("-");
        assert_eq!(Address::from_plain(&dashed).unwrap().plain(), plain);
        assert_eq!(Address::from_plain(&plain.to_lowercase()).unwrap().plain(), plain);

        let mut corrupted = plain.clone();
        corrupted.replace_range(5..6, "1");
        assert!(Address::from_plain(&corrupted).is_err());
        assert!(Address::from_plain(&plain[..38]).is_err());
    }

    #[test]
    fn namespace_alias_encoding() {
        let namespace_id = NamespaceId::from_path("alice").unwrap();
        let alias = UnresolvedAddress::from_namespace(namespace_id, NetworkType::TestNet);
        assert!(alias.is_alias());
        assert_eq!(alias.as_bytes()[0], 0x99);
        assert_eq!(alias.namespace_id(), Some(namespace_id));
        assert!(alias.address().is_none());

        let parsed = UnresolvedAddress::from_raw_hex(&alias.to_raw_hex()).unwrap();
        assert_eq!(parsed, alias);

        let address = Address::from_public_key(&key(), NetworkType::TestNet);
        let plain = UnresolvedAddress::from(address);
        assert!(!plain.is_alias());
        assert_eq!(plain.address(), Some(address));
    }
}
