// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// ids.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;

/// High bit marking an id as a namespace id.
pub const NAMESPACE_FLAG: u64 = 1 << 63;

fn parse_hex_u64(text: &str) -> Result<u64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .chars()
        .filter(|c| *c != '_' && *c != '\'')
        .collect();
    if cleaned.is_empty() || cleaned.len() > 16 {
        return Err(CoreError::InvalidId(text.to_string()));
    }
    u64::from_str_radix(&cleaned, 16).map_err(|_| CoreError::InvalidId(text.to_string()))
}

macro_rules! hex_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw id value
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Raw id value
            pub const fn value(&self) -> u64 {
                self.0
            }

            /// 16-character uppercase hex form used by REST
            pub fn to_hex(&self) -> String {
                format!("{:016X}", self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:016X}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self> {
                parse_hex_u64(s).map(Self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

hex_id!(
    /// Resolved mosaic identifier
    MosaicId
);
hex_id!(
    /// Namespace identifier (high bit always set)
    NamespaceId
);
hex_id!(
    /// Mosaic reference that may be a namespace alias
    UnresolvedMosaicId
);

impl NamespaceId {
    /// Generates the id of `name` registered under `parent` (None for root namespaces)
    pub fn from_name(parent: Option<NamespaceId>, name: &str) -> Self {
        let parent = parent.map(|id| id.0).unwrap_or_default();
        let mut hasher = Sha3_256::new();
        hasher.update((parent as u32).to_le_bytes());
        hasher.update(((parent >> 32) as u32).to_le_bytes());
        hasher.update(name.as_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(bytes) | NAMESPACE_FLAG)
    }

    /// Generates the id of a full dotted namespace path such as `symbol.xym`
    pub fn from_path(path: &str) -> Result<Self> {
        let mut current = None;
        for part in path.split('.') {
            if part.is_empty() {
                return Err(CoreError::InvalidId(path.to_string()));
            }
            current = Some(Self::from_name(current, part));
        }
        current.ok_or_else(|| CoreError::InvalidId(path.to_string()))
    }
}

impl UnresolvedMosaicId {
    /// Whether the reference is a namespace alias
    pub fn is_alias(&self) -> bool {
        self.0 & NAMESPACE_FLAG != 0
    }

    /// The aliased namespace, if this is an alias
    pub fn as_namespace_id(&self) -> Option<NamespaceId> {
        self.is_alias().then_some(NamespaceId(self.0))
    }

    /// The mosaic id, if this is not an alias
    pub fn as_mosaic_id(&self) -> Option<MosaicId> {
        (!self.is_alias()).then_some(MosaicId(self.0))
    }
}

impl From<MosaicId> for UnresolvedMosaicId {
    fn from(id: MosaicId) -> Self {
        Self(id.0)
    }
}

impl From<NamespaceId> for UnresolvedMosaicId {
    fn from(id: NamespaceId) -> Self {
        Self(id.0)
    }
}

/// Account public key
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Wraps raw key bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// 64-character uppercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Whether the key is all zeros (used by REST for unset keys)
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim()).map_err(|_| CoreError::InvalidPublicKey(s.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidPublicKey(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_network_property_style_ids() {
        let id: MosaicId = "0x6BED'913F'A202'23F8".parse().unwrap();
        assert_eq!(id.to_hex(), "6BED913FA20223F8");
        let id: MosaicId = "0x6BED_913F_A202_23F8".parse().unwrap();
        assert_eq!(id.value(), 0x6BED_913F_A202_23F8);
        assert!("".parse::<MosaicId>().is_err());
        assert!("1234567890ABCDEF0".parse::<MosaicId>().is_err());
    }

    #[test]
    fn namespace_ids_always_carry_flag() {
        let root = NamespaceId::from_name(None, "symbol");
        let child = NamespaceId::from_name(Some(root), "xym");
        assert!(root.value() & NAMESPACE_FLAG != 0);
        assert!(child.value() & NAMESPACE_FLAG != 0);
        assert_ne!(root, child);
        assert_eq!(NamespaceId::from_path("symbol.xym").unwrap(), child);
        assert!(NamespaceId::from_path("symbol..xym").is_err());
    }

    #[test]
    fn unresolved_mosaic_distinguishes_aliases() {
        let alias = UnresolvedMosaicId::from(NamespaceId::from_path("symbol.xym").unwrap());
        assert!(alias.is_alias());
        assert!(alias.as_mosaic_id().is_none());

        let mosaic = UnresolvedMosaicId::from(MosaicId::new(0x6BED_913F_A202_23F8));
        assert!(!mosaic.is_alias());
        assert_eq!(mosaic.as_mosaic_id(), Some(MosaicId::new(0x6BED_913F_A202_23F8)));
    }

    #[test]
    fn public_key_requires_32_bytes() {
        let hex = "C5FB65CB902623D93DF2E682FFB13F99D50FAC24D5FF2A42F68C7CA1772FE8A0";
        let key: PublicKey = hex.parse().unwrap();
        assert_eq!(key.to_hex(), hex);
        assert!("C5FB".parse::<PublicKey>().is_err());
        assert!(PublicKey::from_bytes([0; 32]).is_zero());
    }
}
