// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// harvesting.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Harvesting Status Resolver.
//!
//! Recomputes an account's delegated-harvesting status from live queries on
//! every call; nothing is cached.

use crate::rest_client::RestClient;
use crate::statistics::StatisticsClient;
use crate::Result;
use serde::Serialize;
use std::fmt;
use symbol_core::PublicKey;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarvestingStatus {
    /// The account is the main account of a node
    Operator,
    /// Keys are not all linked
    Inactive,
    /// The node harvests with the account's remote key
    Active,
    /// Keys are linked but the node has not picked up the remote key yet
    Pending,
    /// Keys are linked to a node the statistics service does not know
    NodeUnknown,
}

impl fmt::Display for HarvestingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HarvestingStatus::Operator => "OPERATOR",
            HarvestingStatus::Inactive => "INACTIVE",
            HarvestingStatus::Active => "ACTIVE",
            HarvestingStatus::Pending => "PENDING",
            HarvestingStatus::NodeUnknown => "NODE_UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Outcome of [`fetch_harvesting_status`].
///
/// `node_url` is set for `Operator`, `Active` and `Pending`. It is `None` for
/// `Inactive` and for `NodeUnknown`, where the linked node has no known URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestingState {
    pub status: HarvestingStatus,
    pub node_url: Option<Url>,
}

impl HarvestingState {
    fn inactive() -> Self {
        Self {
            status: HarvestingStatus::Inactive,
            node_url: None,
        }
    }
}

/// Determines the harvesting status of the account owning `public_key`.
///
/// `client` is the configured node, used to read the account's linked keys.
/// Node lookups go through `statistics`; the unlocked-account check is sent
/// to the node the keys are linked to.
pub async fn fetch_harvesting_status(
    client: &RestClient,
    statistics: &StatisticsClient,
    public_key: &PublicKey,
) -> Result<HarvestingState> {
    let keys = client
        .fetch_account(&public_key.to_hex())
        .await?
        .map(|account| account.supplemental_public_keys)
        .unwrap_or_default();

    let (Some(linked), Some(node), Some(_vrf)) = (keys.linked(), keys.node(), keys.vrf()) else {
        let state = match statistics.fetch_node_by_main_public_key(public_key).await {
            Ok(Some(entry)) => match entry.gateway_url() {
                Some(url) => HarvestingState {
                    status: HarvestingStatus::Operator,
                    node_url: Some(url),
                },
                None => HarvestingState::inactive(),
            },
            Ok(None) => HarvestingState::inactive(),
            Err(error) => {
                warn!(%public_key, %error, "operator lookup failed");
                HarvestingState::inactive()
            }
        };
        info!(%public_key, status = %state.status, "harvesting status");
        return Ok(state);
    };

    let node_url = match statistics.fetch_node_by_node_public_key(&node).await {
        Ok(entry) => entry.and_then(|entry| entry.gateway_url()),
        Err(error) => {
            warn!(node = %node, %error, "node lookup failed");
            None
        }
    };
    let Some(node_url) = node_url else {
        info!(%public_key, status = %HarvestingStatus::NodeUnknown, "harvesting status");
        return Ok(HarvestingState {
            status: HarvestingStatus::NodeUnknown,
            node_url: None,
        });
    };

    debug!(%node_url, "checking unlocked accounts");
    let unlocked = client.for_node(node_url.clone()).fetch_unlocked_accounts().await?;
    let linked = linked.to_hex();
    let status = if unlocked.iter().any(|key| key.eq_ignore_ascii_case(&linked)) {
        HarvestingStatus::Active
    } else {
        HarvestingStatus::Pending
    };
    info!(%public_key, %status, %node_url, "harvesting status");
    Ok(HarvestingState {
        status,
        node_url: Some(node_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_in_screaming_case() {
        let state = HarvestingState {
            status: HarvestingStatus::NodeUnknown,
            node_url: None,
        };
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            serde_json::json!({"status": "NODE_UNKNOWN", "nodeUrl": null})
        );
        assert_eq!(HarvestingStatus::Active.to_string(), "ACTIVE");
    }
}
