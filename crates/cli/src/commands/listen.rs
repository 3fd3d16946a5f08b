// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// listen.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::parse_address;
use super::CommandResult;
use anyhow::Context;
use serde_json::{json, Value};
use symbol_config::ToolkitConfig;
use symbol_rpc_client::{Channel, CloseEvent, Listener, ListenerEvent};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

/// JSON line printed for a listener event
pub fn render(event: &ListenerEvent) -> Value {
    match event {
        ListenerEvent::Block(block) => json!({"channel": "block", "data": block}),
        ListenerEvent::FinalizedBlock(block) => json!({"channel": "finalizedBlock", "data": block}),
        ListenerEvent::ConfirmedAdded { hash } => json!({"channel": "confirmedAdded", "hash": hash}),
        ListenerEvent::UnconfirmedAdded { hash } => json!({"channel": "unconfirmedAdded", "hash": hash}),
        ListenerEvent::UnconfirmedRemoved { hash } => json!({"channel": "unconfirmedRemoved", "hash": hash}),
        ListenerEvent::PartialAdded { hash } => json!({"channel": "partialAdded", "hash": hash}),
        ListenerEvent::PartialRemoved { hash } => json!({"channel": "partialRemoved", "hash": hash}),
        ListenerEvent::Status(status) => json!({
            "channel": "status",
            "address": status.raw_address,
            "hash": status.hash,
            "code": status.code,
            "deadline": status.deadline,
        }),
        ListenerEvent::Cosignature(cosignature) => json!({
            "channel": "cosignature",
            "parentHash": cosignature.parent_hash,
            "signerPublicKey": cosignature.signer_public_key,
            "signature": cosignature.signature,
            "version": cosignature.version,
        }),
    }
}

/// Streams events of `address` to stdout until Ctrl-C or until the node closes the connection
pub async fn execute(config: &ToolkitConfig, address: &str) -> CommandResult {
    let address = parse_address(address)?;
    let mut listener = Listener::for_properties(&config.network)?;

    let (closed_tx, mut closed) = oneshot::channel::<CloseEvent>();
    let uid = listener
        .open(Some(Box::new(move |event| {
            let _ = closed_tx.send(event);
        })))
        .await
        .with_context(|| format!("failed to open listener on {}", listener.url()))?;
    info!(%uid, address = %address, "listener open");

    let (events_tx, mut events) = mpsc::unbounded_channel();
    let channels = [
        Channel::Block,
        Channel::ConfirmedAdded(address),
        Channel::UnconfirmedAdded(address),
        Channel::PartialAdded(address),
        Channel::Status(address),
        Channel::Cosignature(address),
    ];
    for channel in channels {
        let sender = events_tx.clone();
        listener.subscribe(channel, move |event| {
            let _ = sender.send(event);
        })?;
    }
    drop(events_tx);

    let mut received = 0usize;
    let summary = loop {
        tokio::select! {
            Some(event) = events.recv() => {
                received += 1;
                println!("{}", render(&event));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                listener.close().await;
                break format!("listener closed after {received} events");
            }
            event = &mut closed => {
                match event {
                    Ok(event) => warn!(code = event.code, reason = %event.reason, "node closed the connection"),
                    Err(_) => warn!("listener stopped"),
                }
                break format!("connection closed after {received} events");
            }
        }
    };
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbol_rpc_client::TransactionStatusError;

    #[test]
    fn hash_events_carry_their_channel() {
        let rendered = render(&ListenerEvent::PartialAdded { hash: "AB".to_string() });
        assert_eq!(rendered, json!({"channel": "partialAdded", "hash": "AB"}));
    }

    #[test]
    fn status_keeps_code_and_deadline() {
        let rendered = render(&ListenerEvent::Status(TransactionStatusError {
            raw_address: "98AA".to_string(),
            hash: "CD".to_string(),
            code: "Failure_Core_Insufficient_Balance".to_string(),
            deadline: Some(42),
        }));
        assert_eq!(rendered["code"], "Failure_Core_Insufficient_Balance");
        assert_eq!(rendered["deadline"], 42);
    }
}
