// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// enums.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Wire enumerations carried by transaction payloads, with their display labels.
//!
//! Numeric values mirror the catapult chain definitions and must not change.

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident: $repr:ty {
            $($variant:ident = $value:expr => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Value written on chain
            pub const fn value(&self) -> $repr {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Human readable label
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Looks up a variant by its chain value
            pub fn from_value(value: $repr) -> Result<Self> {
                match value {
                    $(v if v == $value => Ok(Self::$variant),)+
                    other => Err(CoreError::unknown_value(stringify!($name), other)),
                }
            }
        }
    };
}

wire_enum!(
    /// Alias link direction
    AliasAction: u8 {
        Unlink = 0 => "Unlink",
        Link = 1 => "Link",
    }
);

wire_enum!(
    /// Key link direction
    LinkAction: u8 {
        Unlink = 0 => "Unlink",
        Link = 1 => "Link",
    }
);

wire_enum!(
    /// Namespace registration kind
    NamespaceRegistrationType: u8 {
        RootNamespace = 0 => "Root namespace",
        SubNamespace = 1 => "Subnamespace",
    }
);

wire_enum!(
    /// Supply change direction
    MosaicSupplyChangeAction: u8 {
        Decrease = 0 => "Decrease",
        Increase = 1 => "Increase",
    }
);

wire_enum!(
    /// Secret lock hash algorithm
    LockHashAlgorithm: u8 {
        Sha3_256 = 0 => "SHA3-256",
        Hash160 = 1 => "HASH160",
        Hash256 = 2 => "HASH256",
    }
);

wire_enum!(
    /// Mosaic restriction comparison
    MosaicRestrictionType: u8 {
        None = 0 => "No restriction",
        Eq = 1 => "Equal to",
        Ne = 2 => "Not equal to",
        Lt = 3 => "Less than",
        Le = 4 => "Less than or equal to",
        Gt = 5 => "Greater than",
        Ge = 6 => "Greater than or equal to",
    }
);

wire_enum!(
    /// Account restriction flags as combined on chain
    AccountRestrictionFlags: u16 {
        AllowIncomingAddress = 0x0001 => "Allow incoming transactions from addresses",
        AllowMosaic = 0x0002 => "Allow mosaics",
        AllowIncomingTransactionType = 0x0004 => "Allow incoming transaction types",
        AllowOutgoingAddress = 0x4001 => "Allow outgoing transactions to addresses",
        AllowOutgoingTransactionType = 0x4004 => "Allow outgoing transaction types",
        BlockIncomingAddress = 0x8001 => "Block incoming transactions from addresses",
        BlockMosaic = 0x8002 => "Block mosaics",
        BlockIncomingTransactionType = 0x8004 => "Block incoming transaction types",
        BlockOutgoingAddress = 0xC001 => "Block outgoing transactions to addresses",
        BlockOutgoingTransactionType = 0xC004 => "Block outgoing transaction types",
    }
);

wire_enum!(
    /// Leading byte of a transfer message
    MessageType: u8 {
        Plain = 0x00 => "Plain message",
        Encrypted = 0x01 => "Encrypted message",
        PersistentHarvestingDelegation = 0xFE => "Harvesting delegation request",
    }
);

/// Mosaic property flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicFlags {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub restrictable: bool,
    pub revokable: bool,
}

impl MosaicFlags {
    const SUPPLY_MUTABLE: u8 = 0x01;
    const TRANSFERABLE: u8 = 0x02;
    const RESTRICTABLE: u8 = 0x04;
    const REVOKABLE: u8 = 0x08;

    /// Decodes the flag byte
    pub fn from_bits(bits: u8) -> Self {
        Self {
            supply_mutable: bits & Self::SUPPLY_MUTABLE != 0,
            transferable: bits & Self::TRANSFERABLE != 0,
            restrictable: bits & Self::RESTRICTABLE != 0,
            revokable: bits & Self::REVOKABLE != 0,
        }
    }

    /// Encodes the flag byte
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.supply_mutable {
            bits |= Self::SUPPLY_MUTABLE;
        }
        if self.transferable {
            bits |= Self::TRANSFERABLE;
        }
        if self.restrictable {
            bits |= Self::RESTRICTABLE;
        }
        if self.revokable {
            bits |= Self::REVOKABLE;
        }
        bits
    }

    /// Labels of the set flags
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.supply_mutable, "Supply mutable"),
            (self.transferable, "Transferable"),
            (self.restrictable, "Restrictable"),
            (self.revokable, "Revokable"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_action_table() {
        assert_eq!(AliasAction::from_value(0).unwrap(), AliasAction::Unlink);
        assert_eq!(AliasAction::from_value(1).unwrap().label(), "Link");
        assert!(AliasAction::from_value(2).is_err());
    }

    #[test]
    fn restriction_flag_values() {
        assert_eq!(AccountRestrictionFlags::BlockOutgoingAddress.value(), 49153);
        assert_eq!(
            AccountRestrictionFlags::from_value(16388).unwrap(),
            AccountRestrictionFlags::AllowOutgoingTransactionType
        );
        assert_eq!(MosaicRestrictionType::from_value(6).unwrap(), MosaicRestrictionType::Ge);
        assert_eq!(LockHashAlgorithm::from_value(2).unwrap().label(), "HASH256");
    }

    #[test]
    fn mosaic_flags_round_trip() {
        for bits in 0..16u8 {
            assert_eq!(MosaicFlags::from_bits(bits).bits(), bits);
        }
        assert_eq!(
            MosaicFlags::from_bits(0x03).labels(),
            vec!["Supply mutable", "Transferable"]
        );
    }
}
