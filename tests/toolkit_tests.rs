//! Facade-level checks across the config, core and client crates.

use rust_decimal::Decimal;
use std::str::FromStr;
use symbol_rs::core::{to_absolute, to_relative, Deadline, Message};
use symbol_rs::prelude::*;

fn localhost_binding_permitted() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[test]
fn addresses_parse_in_both_forms() {
    let key = PublicKey::from_bytes([5; 32]);
    let address = Address::from_public_key(&key, NetworkType::MainNet);

    assert!(address.plain().starts_with('N'));
    assert_eq!(Address::from_str(&address.plain()).unwrap(), address);
    assert_eq!(Address::from_str(&address.to_raw_hex()).unwrap(), address);
}

#[test]
fn amounts_are_exact_at_currency_divisibility() {
    let config = ToolkitConfig::for_network(NetworkType::TestNet).unwrap();
    let divisibility = config.network.network_currency.divisibility;

    let relative = to_relative(123_456_789, divisibility);
    assert_eq!(relative, Decimal::from_str("123.456789").unwrap());
    assert_eq!(to_absolute(relative, divisibility).unwrap(), 123_456_789);
}

#[test]
fn websocket_endpoint_follows_node_url() {
    let config = ToolkitConfig::for_network(NetworkType::TestNet).unwrap();
    let websocket = config.network.websocket_url().unwrap();
    assert_eq!(websocket.path(), "/ws");
    assert_eq!(websocket.host_str(), config.network.node_url.host_str());
}

#[test]
fn deadlines_count_from_the_network_epoch() {
    let config = ToolkitConfig::for_network(NetworkType::TestNet).unwrap();
    let epoch = config.network.epoch_adjustment;
    let now = chrono::Utc::now();
    let deadline = Deadline::after_hours(now, 2, epoch);
    let at = deadline.to_datetime().unwrap();
    assert_eq!((at - now).num_minutes(), 120);
}

#[test]
fn plain_messages_keep_their_text() {
    let message = Message::plain("hello symbol");
    assert_eq!(message.text().as_deref(), Some("hello symbol"));
}

#[tokio::test]
async fn listener_reports_unreachable_node() {
    if !localhost_binding_permitted() {
        return;
    }
    let port = {
        let socket = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        socket.local_addr().unwrap().port()
    };
    let url = url_for(port);
    let mut listener = Listener::new(url);
    assert!(listener.open(None).await.is_err());
}

fn url_for(port: u16) -> url::Url {
    url::Url::parse(&format!("ws://127.0.0.1:{port}/ws")).unwrap()
}
