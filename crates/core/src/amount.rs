// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// amount.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Conversion between absolute (integer minor units) and relative amounts.
//!
//! Domain objects only ever hold relative amounts; the SDK boundary only ever
//! holds absolute ones. All arithmetic is exact decimal arithmetic.

use crate::{CoreError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest divisibility representable by the decimal type used here.
pub const MAX_DIVISIBILITY: u8 = 18;

/// Scales an absolute amount down by `divisibility` decimal places.
pub fn to_relative(absolute: u64, divisibility: u8) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(absolute), u32::from(divisibility.min(MAX_DIVISIBILITY)))
}

/// Scales a relative amount up to integer minor units, rounding half away from zero.
pub fn to_absolute(relative: Decimal, divisibility: u8) -> Result<u64> {
    if relative.is_sign_negative() && !relative.is_zero() {
        return Err(CoreError::AmountOutOfRange(relative.to_string()));
    }

    let factor = Decimal::from_i128_with_scale(10i128.pow(u32::from(divisibility.min(MAX_DIVISIBILITY))), 0);
    relative
        .checked_mul(factor)
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_u64())
        .ok_or_else(|| CoreError::AmountOutOfRange(relative.to_string()))
}

/// Sums relative amounts exactly and presents the result at `divisibility` places.
pub fn sum_at_divisibility<I>(amounts: I, divisibility: u8) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let scale = u32::from(divisibility.min(MAX_DIVISIBILITY));
    let mut total = amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc + amount)
        .round_dp(scale);
    total.rescale(scale);
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn converts_between_representations() {
        let relative = to_relative(1_234_567, 6);
        assert_eq!(relative.to_string(), "1.234567");
        assert_eq!(to_absolute(relative, 6).unwrap(), 1_234_567);
        assert_eq!(to_relative(5, 0).to_string(), "5");
    }

    #[test]
    fn absolute_rounding_and_range() {
        let value = Decimal::from_str("0.0000005").unwrap();
        assert_eq!(to_absolute(value, 6).unwrap(), 1);
        assert!(to_absolute(Decimal::from_str("-1").unwrap(), 6).is_err());
        assert!(to_absolute(Decimal::from(u64::MAX), 6).is_err());
    }

    #[test]
    fn aggregate_sum_is_exact() {
        let amounts = ["1.000000", "-0.4", "0.4"]
            .iter()
            .map(|a| Decimal::from_str(a).unwrap());
        let total = sum_at_divisibility(amounts, 6);
        assert_eq!(total.to_string(), "1.000000");
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn float_drift_cases_stay_exact() {
        let amounts = ["0.1", "0.2"].iter().map(|a| Decimal::from_str(a).unwrap());
        assert_eq!(sum_at_divisibility(amounts, 6).to_string(), "0.300000");
    }
}
