//! Account queries against a mocked REST gateway.

use mockito::{Matcher, Server};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use symbol_config::{NetworkProperties, NetworkType};
use symbol_core::{
    Address, NamespaceId, PublicKey, TransactionBody, TransactionGroup, UnresolvedAddress,
};
use symbol_rpc_client::models::Pagination;
use symbol_rpc_client::{fetch_account_info, fetch_account_transactions, RestClient};
use url::Url;

const CURRENCY: &str = "72C0212E67A08BCE";

fn localhost_binding_permitted() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn account(seed: u8) -> (PublicKey, Address) {
    let key = PublicKey::from_bytes([seed; 32]);
    (key, Address::from_public_key(&key, NetworkType::TestNet))
}

fn setup(server: &Server) -> (RestClient, NetworkProperties) {
    let url = Url::parse(&server.url()).expect("server url");
    let properties = NetworkProperties::for_network(NetworkType::TestNet, url.clone()).expect("properties");
    (RestClient::new(url).expect("client"), properties)
}

async fn mock_currency(server: &mut Server) -> (mockito::Mock, mockito::Mock) {
    let (_, owner) = account(9);
    let infos = server
        .mock("POST", "/mosaics")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{"mosaic": {
                "id": CURRENCY,
                "supply": "8999999999000000",
                "startHeight": "1",
                "ownerAddress": owner.to_raw_hex(),
                "flags": 2,
                "divisibility": 6,
                "duration": "0"
            }}])
            .to_string(),
        )
        .create_async()
        .await;
    let names = server
        .mock("POST", "/namespaces/mosaic/names")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"mosaicNames": [{"mosaicId": CURRENCY, "names": ["symbol.xym"]}]}).to_string())
        .create_async()
        .await;
    (infos, names)
}

#[tokio::test]
async fn account_info_survives_multisig_failure() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let (client, properties) = setup(&server);
    let (key, address) = account(1);

    let _account = server
        .mock("GET", format!("/accounts/{}", address.plain()).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"account": {
                "address": address.to_raw_hex(),
                "publicKey": key.to_hex(),
                "importance": "120",
                "mosaics": [{"id": CURRENCY, "amount": "2500000"}]
            }})
            .to_string(),
        )
        .create_async()
        .await;
    let _multisig = server
        .mock("GET", format!("/account/{}/multisig", address.plain()).as_str())
        .with_status(500)
        .with_body(json!({"code": "Internal", "message": "boom"}).to_string())
        .create_async()
        .await;
    let _currency = mock_currency(&mut server).await;

    let info = fetch_account_info(&client, &properties, &address).await.expect("account info");

    assert_eq!(info.public_key, Some(key));
    assert_eq!(info.importance, 120);
    assert_eq!(info.balance, Decimal::from_str("2.500000").unwrap());
    assert_eq!(info.mosaics[0].name.as_deref(), Some("symbol.xym"));
    assert!(info.multisig.is_none());
    assert_eq!(info.failures.len(), 1);
    assert!(info.failures[0].starts_with("multisig"));
}

#[tokio::test]
async fn unknown_account_has_zero_balance() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let (client, properties) = setup(&server);
    let (_, address) = account(2);

    let _account = server
        .mock("GET", format!("/accounts/{}", address.plain()).as_str())
        .with_status(404)
        .with_body(json!({"code": "ResourceNotFound", "message": "no resource exists"}).to_string())
        .create_async()
        .await;
    let _multisig = server
        .mock("GET", format!("/account/{}/multisig", address.plain()).as_str())
        .with_status(404)
        .create_async()
        .await;

    let info = fetch_account_info(&client, &properties, &address).await.expect("account info");
    assert_eq!(info.balance, Decimal::ZERO);
    assert!(info.mosaics.is_empty());
    assert!(info.multisig.is_none());
    assert!(info.failures.is_empty());
}

#[tokio::test]
async fn account_transactions_are_resolved_and_signed() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let (client, properties) = setup(&server);
    let (_, alice) = account(1);
    let (bob_key, _) = account(2);
    let alias = UnresolvedAddress::from_namespace(NamespaceId::from_path("alice").unwrap(), NetworkType::TestNet);

    let search = server
        .mock("GET", Matcher::Regex("^/transactions/confirmed".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("address".into(), alice.plain()),
            Matcher::UrlEncoded("pageNumber".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": [{
                    "id": "1",
                    "meta": {"height": "10", "hash": "AB".repeat(32), "index": 0, "timestamp": "5000"},
                    "transaction": {
                        "type": 16724,
                        "signerPublicKey": bob_key.to_hex(),
                        "network": 152,
                        "version": 1,
                        "maxFee": "20000",
                        "deadline": "7000",
                        "recipientAddress": alias.to_raw_hex(),
                        "mosaics": [{"id": CURRENCY, "amount": "1000000"}]
                    }
                }],
                "pagination": {"pageNumber": 1, "pageSize": 10}
            })
            .to_string(),
        )
        .create_async()
        .await;
    let resolutions = server
        .mock("GET", "/statements/resolutions/address")
        .match_query(Matcher::UrlEncoded("height".into(), "10".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"data": [{"statement": {
                "height": "10",
                "unresolved": alias.to_raw_hex(),
                "resolutionEntries": [{"source": {"primaryId": 1, "secondaryId": 0}, "resolved": alice.to_raw_hex()}]
            }}]})
            .to_string(),
        )
        .create_async()
        .await;
    let _currency = mock_currency(&mut server).await;

    let page = fetch_account_transactions(
        &client,
        &properties,
        &alice,
        TransactionGroup::Confirmed,
        &Pagination::new(1, 10),
    )
    .await
    .expect("transactions");

    search.assert_async().await;
    resolutions.assert_async().await;
    assert_eq!(page.data.len(), 1);
    let transaction = &page.data[0];
    assert_eq!(transaction.fee, Some(Decimal::from_str("0.020000").unwrap()));
    assert_eq!(transaction.meta.as_ref().unwrap().group, Some(TransactionGroup::Confirmed));
    let TransactionBody::Transfer(transfer) = &transaction.body else {
        panic!("expected transfer, got {:?}", transaction.body);
    };
    assert_eq!(transfer.recipient_address, alice);
    assert_eq!(transfer.amount, Decimal::from_str("1.000000").unwrap());
}

#[tokio::test]
async fn failed_group_cannot_be_searched() {
    let url = Url::parse("http://localhost:3000").unwrap();
    let properties = NetworkProperties::for_network(NetworkType::TestNet, url.clone()).unwrap();
    let client = RestClient::new(url).unwrap();
    let (_, alice) = account(1);

    let error = fetch_account_transactions(&client, &properties, &alice, TransactionGroup::Failed, &Pagination::default())
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        symbol_rpc_client::ClientError::Protocol(symbol_rpc_client::ProtocolError::UnsupportedGroup { .. })
    ));
}
