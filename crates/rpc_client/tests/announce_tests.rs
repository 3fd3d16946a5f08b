//! Announcement workflow against mocked nodes.

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use std::time::Duration;
use symbol_config::{AnnounceConfig, NetworkProperties, NetworkType};
use symbol_core::{BundleType, SignedTransaction, TransactionBundle};
use symbol_rpc_client::{AnnounceGroup, Announcer, ClientError, RestClient};
use tokio::sync::watch;
use url::Url;

fn localhost_binding_permitted() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn signed(payload: &str, hash_byte: &str) -> SignedTransaction {
    SignedTransaction::from_hex(payload, &hash_byte.repeat(32)).expect("signed transaction")
}

/// Announcer whose configured node is `primary` and whose peers are `peers`
fn announcer(primary: &ServerGuard, peers: &[ServerGuard]) -> Announcer {
    let node = Url::parse(&primary.url()).expect("server url");
    let mut properties = NetworkProperties::for_network(NetworkType::TestNet, node.clone()).expect("properties");
    properties.known_nodes = peers
        .iter()
        .map(|peer| Url::parse(&peer.url()).expect("peer url"))
        .collect();
    let config = AnnounceConfig {
        extra_nodes: 3,
        poll_interval_ms: 10,
    };
    Announcer::new(RestClient::new(node).expect("client"), &properties, &config)
}

/// Announce endpoint rejecting every payload; not yet registered
fn reject(server: &mut ServerGuard, path: &str) -> Mock {
    server
        .mock("PUT", path)
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(json!({"code": "InvalidArgument", "message": "payload rejected"}).to_string())
}

/// Announce endpoint accepting every payload; not yet registered
fn accept(server: &mut ServerGuard, path: &str) -> Mock {
    server
        .mock("PUT", path)
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "packet 9 was pushed to the network via /transactions"}).to_string())
}

async fn status(server: &mut ServerGuard, hash: &str, group: &str, code: &str) -> Mock {
    server
        .mock("GET", format!("/transactionStatus/{hash}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"group": group, "code": code, "hash": hash, "deadline": "100", "height": "0"}).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn one_accepting_node_is_enough() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut primary = Server::new_async().await;
    let mut peers = vec![Server::new_async().await, Server::new_async().await, Server::new_async().await];

    let _primary = reject(&mut primary, "/transactions").create_async().await;
    let _a = reject(&mut peers[0], "/transactions").create_async().await;
    let _b = reject(&mut peers[1], "/transactions").create_async().await;
    let accepted = accept(&mut peers[2], "/transactions").create_async().await;

    let announcer = announcer(&primary, &peers);
    let response = announcer
        .announce_transaction(&signed("0102", "AA"), AnnounceGroup::Default)
        .await
        .expect("announced");

    accepted.assert_async().await;
    assert!(response.message.contains("pushed"));
}

#[tokio::test]
async fn all_rejections_are_aggregated() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut primary = Server::new_async().await;
    let mut peers = vec![Server::new_async().await, Server::new_async().await, Server::new_async().await];

    let _primary = reject(&mut primary, "/transactions/partial").create_async().await;
    let mut mocks = Vec::new();
    for peer in peers.iter_mut() {
        mocks.push(reject(peer, "/transactions/partial").create_async().await);
    }

    let announcer = announcer(&primary, &peers);
    let error = announcer
        .announce_transaction(&signed("0102", "AA"), AnnounceGroup::Partial)
        .await
        .unwrap_err();

    match error {
        ClientError::AllNodesRejected { failures } => {
            assert_eq!(failures.len(), 4);
            assert!(failures.iter().all(|failure| failure.error.contains("409")));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn failed_stage_stops_the_sequence() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut primary = Server::new_async().await;
    let first = signed("01", "AA");
    let second = signed("02", "BB");

    let lock = primary
        .mock("PUT", "/transactions")
        .match_body(Matcher::PartialJson(json!({"payload": "01"})))
        .with_status(202)
        .with_body(json!({"message": "ok"}).to_string())
        .expect(1)
        .create_async()
        .await;
    let bonded = accept(&mut primary, "/transactions/partial").expect(0).create_async().await;
    let _status = status(&mut primary, first.hash(), "failed", "Failure_Core_Insufficient_Balance").await;

    let announcer = announcer(&primary, &[]);
    let error = announcer
        .announce_transactions_sequentially(&[first.clone(), second], AnnounceGroup::Partial, None)
        .await
        .unwrap_err();

    lock.assert_async().await;
    bonded.assert_async().await;
    match error {
        ClientError::BundleStageFailed { index, hash, group, code } => {
            assert_eq!(index, 0);
            assert_eq!(hash, first.hash());
            assert_eq!(group, "failed");
            assert_eq!(code, "Failure_Core_Insufficient_Balance");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn multisig_bundle_waits_for_confirmation() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut primary = Server::new_async().await;
    let lock = signed("01", "AA");
    let bonded = signed("02", "BB");

    let lock_mock = accept(&mut primary, "/transactions").expect(1).create_async().await;
    let bonded_mock = accept(&mut primary, "/transactions/partial").expect(1).create_async().await;
    let _status = status(&mut primary, lock.hash(), "confirmed", "Success").await;

    let bundle = TransactionBundle::new(vec![lock, bonded], BundleType::MultisigTransfer);
    announcer(&primary, &[])
        .announce_transaction_bundle(&bundle, None)
        .await
        .expect("bundle announced");

    lock_mock.assert_async().await;
    bonded_mock.assert_async().await;
}

#[tokio::test]
async fn cancellation_interrupts_polling() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut primary = Server::new_async().await;
    let first = signed("01", "AA");
    let second = signed("02", "BB");

    let _lock = accept(&mut primary, "/transactions").create_async().await;
    let bonded = accept(&mut primary, "/transactions/partial").expect(0).create_async().await;
    let _pending = status(&mut primary, first.hash(), "unconfirmed", "Success").await;

    let (cancel, cancelled) = watch::channel(false);
    let announcer = announcer(&primary, &[]).with_poll_interval(Duration::from_millis(50));
    let transactions = [first, second];
    let sequence = announcer.announce_transactions_sequentially(&transactions, AnnounceGroup::Partial, Some(cancelled));
    let trigger = async {
        tokio::time::sleep(Duration::from_millis(120)).await;
        cancel.send_replace(true);
    };

    let (result, ()) = tokio::join!(sequence, trigger);
    assert!(matches!(result, Err(ClientError::Cancelled)));
    bonded.assert_async().await;
}

#[tokio::test]
async fn default_bundle_fails_when_any_announce_fails() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut primary = Server::new_async().await;
    let _accepted = primary
        .mock("PUT", "/transactions")
        .match_body(Matcher::PartialJson(json!({"payload": "01"})))
        .with_status(202)
        .with_body(json!({"message": "ok"}).to_string())
        .create_async()
        .await;
    let _rejected = primary
        .mock("PUT", "/transactions")
        .match_body(Matcher::PartialJson(json!({"payload": "02"})))
        .with_status(409)
        .with_body(json!({"code": "InvalidArgument", "message": "bad"}).to_string())
        .create_async()
        .await;

    let bundle = TransactionBundle::new(vec![signed("01", "AA"), signed("02", "BB")], BundleType::Default);
    let error = announcer(&primary, &[])
        .announce_transaction_bundle(&bundle, None)
        .await
        .unwrap_err();
    assert!(matches!(error, ClientError::AllNodesRejected { .. }));
}
