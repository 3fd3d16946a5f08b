// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// deadline.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Transaction deadline.
///
/// `timestamp` is milliseconds since the network nemesis block, `adjusted` is
/// the same instant in milliseconds since the unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deadline {
    pub timestamp: u64,
    pub adjusted: u64,
}

impl Deadline {
    /// Builds a deadline from network time and the epoch adjustment in seconds
    pub fn from_network_time(timestamp: u64, epoch_adjustment: u64) -> Self {
        Self {
            timestamp,
            adjusted: timestamp.saturating_add(epoch_adjustment.saturating_mul(1000)),
        }
    }

    /// Deadline `hours` after `now`
    pub fn after_hours(now: DateTime<Utc>, hours: u32, epoch_adjustment: u64) -> Self {
        let unix_ms = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let adjusted = unix_ms.saturating_add(u64::from(hours) * 3_600_000);
        Self {
            timestamp: adjusted.saturating_sub(epoch_adjustment.saturating_mul(1000)),
            adjusted,
        }
    }

    /// The adjusted deadline as a UTC date
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.adjusted).ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}
