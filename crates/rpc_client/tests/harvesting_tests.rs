//! Harvesting status decisions against a mocked node and statistics service.

use mockito::{Server, ServerGuard};
use serde_json::json;
use symbol_core::{Address, NetworkType, PublicKey};
use symbol_rpc_client::{fetch_harvesting_status, HarvestingStatus, RestClient, StatisticsClient};
use url::Url;

fn localhost_binding_permitted() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

struct Keys {
    main: PublicKey,
    linked: PublicKey,
    node: PublicKey,
    vrf: PublicKey,
}

fn keys() -> Keys {
    Keys {
        main: PublicKey::from_bytes([1; 32]),
        linked: PublicKey::from_bytes([2; 32]),
        node: PublicKey::from_bytes([3; 32]),
        vrf: PublicKey::from_bytes([4; 32]),
    }
}

fn clients(node: &ServerGuard, statistics: &ServerGuard) -> (RestClient, StatisticsClient) {
    let node = Url::parse(&node.url()).expect("node url");
    let statistics = Url::parse(&statistics.url()).expect("statistics url");
    (RestClient::new(node).expect("client"), StatisticsClient::new(statistics))
}

async fn mock_account(server: &mut ServerGuard, keys: &Keys, linked: bool) -> mockito::Mock {
    let address = Address::from_public_key(&keys.main, NetworkType::TestNet);
    let supplemental = if linked {
        json!({
            "linked": {"publicKey": keys.linked.to_hex()},
            "node": {"publicKey": keys.node.to_hex()},
            "vrf": {"publicKey": keys.vrf.to_hex()}
        })
    } else {
        json!({"linked": {"publicKey": keys.linked.to_hex()}})
    };
    server
        .mock("GET", format!("/accounts/{}", keys.main.to_hex()).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"account": {
                "address": address.to_raw_hex(),
                "publicKey": keys.main.to_hex(),
                "supplementalPublicKeys": supplemental,
                "mosaics": []
            }})
            .to_string(),
        )
        .create_async()
        .await
}

async fn mock_statistics_node(server: &mut ServerGuard, path: &str, gateway: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "publicKey": "AA",
                "host": "127.0.0.1",
                "apiStatus": {"restGatewayUrl": gateway, "isAvailable": true}
            })
            .to_string(),
        )
        .create_async()
        .await
}

async fn mock_unlocked(server: &mut ServerGuard, accounts: &[String]) -> mockito::Mock {
    server
        .mock("GET", "/node/unlockedaccount")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"unlockedAccount": accounts}).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn linked_key_unlocked_on_node_is_active() {
    if !localhost_binding_permitted() {
        return;
    }
    let keys = keys();
    let mut node = Server::new_async().await;
    let mut statistics = Server::new_async().await;

    let _account = mock_account(&mut node, &keys, true).await;
    let _lookup = mock_statistics_node(
        &mut statistics,
        &format!("/nodes/nodePublicKey/{}", keys.node),
        &node.url(),
    )
    .await;
    let unlocked = mock_unlocked(&mut node, &[keys.linked.to_hex().to_lowercase()]).await;

    let (client, statistics_client) = clients(&node, &statistics);
    let state = fetch_harvesting_status(&client, &statistics_client, &keys.main)
        .await
        .expect("status");

    unlocked.assert_async().await;
    assert_eq!(state.status, HarvestingStatus::Active);
    assert_eq!(state.node_url, Some(Url::parse(&node.url()).unwrap()));
}

#[tokio::test]
async fn linked_key_missing_from_node_is_pending() {
    if !localhost_binding_permitted() {
        return;
    }
    let keys = keys();
    let mut node = Server::new_async().await;
    let mut statistics = Server::new_async().await;

    let _account = mock_account(&mut node, &keys, true).await;
    let _lookup = mock_statistics_node(
        &mut statistics,
        &format!("/nodes/nodePublicKey/{}", keys.node),
        &node.url(),
    )
    .await;
    let _unlocked = mock_unlocked(&mut node, &[keys.vrf.to_hex()]).await;

    let (client, statistics_client) = clients(&node, &statistics);
    let state = fetch_harvesting_status(&client, &statistics_client, &keys.main)
        .await
        .expect("status");
    assert_eq!(state.status, HarvestingStatus::Pending);
    assert!(state.node_url.is_some());
}

#[tokio::test]
async fn unknown_node_key() {
    if !localhost_binding_permitted() {
        return;
    }
    let keys = keys();
    let mut node = Server::new_async().await;
    let mut statistics = Server::new_async().await;

    let _account = mock_account(&mut node, &keys, true).await;
    let _lookup = statistics
        .mock("GET", format!("/nodes/nodePublicKey/{}", keys.node).as_str())
        .with_status(404)
        .create_async()
        .await;
    let unlocked = node.mock("GET", "/node/unlockedaccount").expect(0).create_async().await;

    let (client, statistics_client) = clients(&node, &statistics);
    let state = fetch_harvesting_status(&client, &statistics_client, &keys.main)
        .await
        .expect("status");
    unlocked.assert_async().await;
    assert_eq!(state.status, HarvestingStatus::NodeUnknown);
    assert_eq!(state.node_url, None);
}

#[tokio::test]
async fn node_main_account_is_operator() {
    if !localhost_binding_permitted() {
        return;
    }
    let keys = keys();
    let mut node = Server::new_async().await;
    let mut statistics = Server::new_async().await;

    let _account = mock_account(&mut node, &keys, false).await;
    let _lookup = mock_statistics_node(
        &mut statistics,
        &format!("/nodes/{}", keys.main),
        "http://operator.example:3000",
    )
    .await;

    let (client, statistics_client) = clients(&node, &statistics);
    let state = fetch_harvesting_status(&client, &statistics_client, &keys.main)
        .await
        .expect("status");
    assert_eq!(state.status, HarvestingStatus::Operator);
    assert_eq!(state.node_url.unwrap().as_str(), "http://operator.example:3000/");
}

#[tokio::test]
async fn unknown_account_is_inactive() {
    if !localhost_binding_permitted() {
        return;
    }
    let keys = keys();
    let mut node = Server::new_async().await;
    let mut statistics = Server::new_async().await;

    let _account = node
        .mock("GET", format!("/accounts/{}", keys.main.to_hex()).as_str())
        .with_status(404)
        .create_async()
        .await;
    let _lookup = statistics
        .mock("GET", format!("/nodes/{}", keys.main).as_str())
        .with_status(404)
        .create_async()
        .await;

    let (client, statistics_client) = clients(&node, &statistics);
    let state = fetch_harvesting_status(&client, &statistics_client, &keys.main)
        .await
        .expect("status");
    assert_eq!(state.status, HarvestingStatus::Inactive);
    assert_eq!(state.node_url, None);
}
