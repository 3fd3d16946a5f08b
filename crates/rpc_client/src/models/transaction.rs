// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// transaction.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::common::{opt_u64_from_any, u64_from_any, value_as_u64};
use crate::{ClientError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use symbol_core::{PublicKey, TransactionType};

/// Transaction as returned by `/transactions/{group}` endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDto {
    pub id: Option<String>,
    #[serde(default)]
    pub meta: Option<TransactionMetaDto>,
    pub transaction: TransactionInfoDto,
}

impl TransactionDto {
    pub fn hash(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|meta| meta.hash.as_deref())
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        TransactionType::from_code(self.transaction.type_code)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetaDto {
    #[serde(default, deserialize_with = "opt_u64_from_any")]
    pub height: Option<u64>,
    pub hash: Option<String>,
    #[serde(default)]
    pub index: u32,
    #[serde(default, deserialize_with = "opt_u64_from_any")]
    pub timestamp: Option<u64>,
    pub aggregate_hash: Option<String>,
    pub aggregate_id: Option<String>,
}

/// Transaction body; type-specific fields are kept as JSON and read on demand
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfoDto {
    #[serde(rename = "type")]
    pub type_code: u16,
    pub signer_public_key: String,
    pub network: u8,
    #[serde(default)]
    pub version: u8,
    #[serde(default, deserialize_with = "opt_u64_from_any")]
    pub max_fee: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_from_any")]
    pub deadline: Option<u64>,
    /// Inner transactions of aggregates
    #[serde(default)]
    pub transactions: Vec<TransactionDto>,
    #[serde(default)]
    pub cosignatures: Vec<CosignatureDto>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TransactionInfoDto {
    pub fn signer(&self) -> Result<PublicKey> {
        Ok(self.signer_public_key.parse()?)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    fn missing(&self, name: &str) -> ClientError {
        ClientError::codec(format!(
            "transaction type {:#06x} is missing field '{name}'",
            self.type_code
        ))
    }

    pub fn str(&self, name: &str) -> Result<&str> {
        self.field(name)
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing(name))
    }

    pub fn opt_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn u64(&self, name: &str) -> Result<u64> {
        self.field(name)
            .and_then(value_as_u64)
            .ok_or_else(|| self.missing(name))
    }

    /// Signed integers such as multisig deltas
    pub fn i64(&self, name: &str) -> Result<i64> {
        let value = self.field(name).ok_or_else(|| self.missing(name))?;
        match value {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.parse().ok(),
            _ => None,
        }
        .ok_or_else(|| self.missing(name))
    }

    /// 64-bit keys written as 16-character hex
    pub fn hex_u64(&self, name: &str) -> Result<u64> {
        let text = self.str(name)?;
        u64::from_str_radix(text, 16)
            .map_err(|_| ClientError::codec(format!("field '{name}' is not hex: {text}")))
    }

    pub fn bytes(&self, name: &str) -> Result<Vec<u8>> {
        match self.opt_str(name) {
            Some(text) => hex::decode(text)
                .map_err(|_| ClientError::codec(format!("field '{name}' is not hex: {text}"))),
            None => Ok(Vec::new()),
        }
    }

    pub fn array(&self, name: &str) -> &[Value] {
        self.field(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// String elements of an array field
    pub fn strings(&self, name: &str) -> Vec<&str> {
        self.array(name).iter().filter_map(Value::as_str).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureDto {
    #[serde(default, deserialize_with = "u64_from_any")]
    pub version: u64,
    pub signer_public_key: String,
    pub signature: String,
}

/// `GET /transactionStatus/{hash}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusDto {
    pub group: String,
    #[serde(default)]
    pub code: String,
    pub hash: String,
    #[serde(default, deserialize_with = "opt_u64_from_any")]
    pub deadline: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_from_any")]
    pub height: Option<u64>,
}

/// Body of `PUT /transactions` and `PUT /transactions/partial`
#[derive(Debug, Clone, Serialize)]
pub struct AnnounceRequest {
    pub payload: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnounceResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_fields_regardless_of_number_encoding() {
        let dto: TransactionDto = serde_json::from_value(json!({
            "meta": {"height": "12", "hash": "AB", "index": 3, "timestamp": "99"},
            "transaction": {
                "type": 16724,
                "signerPublicKey": "C5FB65CB902623D93DF2E682FFB13F99D50FAC24D5FF2A42F68C7CA1772FE8A0",
                "network": 152,
                "version": 1,
                "maxFee": "20000",
                "deadline": 123,
                "recipientAddress": "98AB",
                "message": "0068690A",
                "mosaics": [{"id": "72C0212E67A08BCE", "amount": "10"}]
            }
        }))
        .unwrap();

        assert_eq!(dto.transaction_type(), Some(TransactionType::Transfer));
        assert_eq!(dto.meta.as_ref().unwrap().height, Some(12));
        assert_eq!(dto.transaction.max_fee, Some(20_000));
        assert_eq!(dto.transaction.deadline, Some(123));
        assert_eq!(dto.transaction.str("recipientAddress").unwrap(), "98AB");
        assert_eq!(dto.transaction.bytes("message").unwrap(), vec![0, 0x68, 0x69, 0x0A]);
        assert_eq!(dto.transaction.array("mosaics").len(), 1);
        assert!(dto.transaction.u64("duration").is_err());
        assert!(dto.transaction.transactions.is_empty());
    }
}
