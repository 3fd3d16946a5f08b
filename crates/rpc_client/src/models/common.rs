// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// common.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Shapes shared by several REST endpoints.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use symbol_config::MAX_PAGE_SIZE;

/// Parses REST integers that arrive either as JSON numbers or as decimal strings.
pub(crate) fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

/// Deserializes a `u64` sent as a number or a decimal string.
pub(crate) fn u64_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value_as_u64(&value).ok_or_else(|| de::Error::custom(format!("expected integer, got {value}")))
}

/// Optional variant of [`u64_from_any`].
pub(crate) fn opt_u64_from_any<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value_as_u64(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected integer, got {value}"))),
    }
}

/// Sort order of list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Page selection accepted by every list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_number: u32,
    pub page_size: u32,
    pub order: Order,
}

impl Pagination {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            order: Order::Desc,
        }
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Query parameters in the order REST expects them
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("pageNumber", self.page_number.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("order", self.order.as_str().to_string()),
        ]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// Page metadata returned by list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page_number: u32,
    pub page_size: u32,
}

/// One page of a list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: PageInfo,
}

/// REST error body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_accept_both_encodings() {
        assert_eq!(value_as_u64(&json!("18446744073709551615")), Some(u64::MAX));
        assert_eq!(value_as_u64(&json!(42)), Some(42));
        assert_eq!(value_as_u64(&json!("x")), None);
        assert_eq!(value_as_u64(&json!(null)), None);
    }

    #[test]
    fn pagination_is_clamped() {
        let pagination = Pagination::new(0, 1_000);
        assert_eq!(pagination.page_number, 1);
        assert_eq!(pagination.page_size, MAX_PAGE_SIZE);
        assert_eq!(pagination.query_pairs()[2].1, "desc");
    }
}
