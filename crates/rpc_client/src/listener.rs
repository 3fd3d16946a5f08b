// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// listener.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! WebSocket listener for block, transaction and status events.
//!
//! One [`Listener`] owns at most one connection. The socket and the handler
//! table live inside a connection task; the listener talks to it over
//! channels, so only that task ever touches them. A connection is usable once
//! the node has sent the handshake message carrying the session `uid`, which
//! prefixes every subscribe request.

use crate::{ClientError, ProtocolError, Result};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use symbol_config::NetworkProperties;
use symbol_core::Address;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};
use url::Url;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Callback invoked for every event of a subscribed channel
pub type Handler = Box<dyn FnMut(ListenerEvent) + Send>;

/// Callback invoked once when the node or the network closes the connection
pub type CloseCallback = Box<dyn FnOnce(CloseEvent) + Send>;

/// Close code sent when the node speaks a channel this client does not know
const PROTOCOL_ERROR_CODE: u16 = 1002;
/// Close code reported when the connection dropped without a close frame
const ABNORMAL_CLOSE_CODE: u16 = 1006;
const NO_STATUS_CODE: u16 = 1005;

/// Subscribable channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Block,
    FinalizedBlock,
    ConfirmedAdded(Address),
    UnconfirmedAdded(Address),
    UnconfirmedRemoved(Address),
    PartialAdded(Address),
    PartialRemoved(Address),
    Status(Address),
    Cosignature(Address),
}

impl Channel {
    /// Channel name as used in topics
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Block => "block",
            Channel::FinalizedBlock => "finalizedBlock",
            Channel::ConfirmedAdded(_) => "confirmedAdded",
            Channel::UnconfirmedAdded(_) => "unconfirmedAdded",
            Channel::UnconfirmedRemoved(_) => "unconfirmedRemoved",
            Channel::PartialAdded(_) => "partialAdded",
            Channel::PartialRemoved(_) => "partialRemoved",
            Channel::Status(_) => "status",
            Channel::Cosignature(_) => "cosignature",
        }
    }

    /// Topic sent in the subscribe request: the name, followed by `/address` for account channels
    pub fn topic(&self) -> String {
        match self {
            Channel::Block | Channel::FinalizedBlock => self.name().to_string(),
            Channel::ConfirmedAdded(address)
            | Channel::UnconfirmedAdded(address)
            | Channel::UnconfirmedRemoved(address)
            | Channel::PartialAdded(address)
            | Channel::PartialRemoved(address)
            | Channel::Status(address)
            | Channel::Cosignature(address) => format!("{}/{}", self.name(), address.plain()),
        }
    }
}

/// Failure status pushed on the `status` channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStatusError {
    /// Address parameter of the channel the status arrived on
    pub raw_address: String,
    pub hash: String,
    pub code: String,
    pub deadline: Option<u64>,
}

/// Cosignature pushed on the `cosignature` channel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureEvent {
    pub parent_hash: String,
    pub signer_public_key: String,
    pub signature: String,
    #[serde(default, deserialize_with = "crate::models::common::u64_from_any")]
    pub version: u64,
}

/// Event delivered to a channel handler
#[derive(Debug, Clone, PartialEq)]
pub enum ListenerEvent {
    /// Raw block as sent by the node
    Block(Value),
    FinalizedBlock(Value),
    ConfirmedAdded { hash: String },
    UnconfirmedAdded { hash: String },
    UnconfirmedRemoved { hash: String },
    PartialAdded { hash: String },
    PartialRemoved { hash: String },
    Status(TransactionStatusError),
    Cosignature(CosignatureEvent),
}

fn transaction_hash(channel: &str, data: &Value) -> std::result::Result<String, ProtocolError> {
    data.pointer("/meta/hash")
        .or_else(|| data.get("hash"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ProtocolError::MalformedMessage {
            message: format!("{channel} event without transaction hash"),
        })
}

impl ListenerEvent {
    /// Reshapes the payload of a `channel/parameter` topic
    pub fn decode(channel: &str, parameter: &str, data: Value) -> std::result::Result<Self, ProtocolError> {
        let event = match channel {
            "block" => ListenerEvent::Block(data),
            "finalizedBlock" => ListenerEvent::FinalizedBlock(data),
            "confirmedAdded" => ListenerEvent::ConfirmedAdded {
                hash: transaction_hash(channel, &data)?,
            },
            "unconfirmedAdded" => ListenerEvent::UnconfirmedAdded {
                hash: transaction_hash(channel, &data)?,
            },
            "unconfirmedRemoved" => ListenerEvent::UnconfirmedRemoved {
                hash: transaction_hash(channel, &data)?,
            },
            "partialAdded" => ListenerEvent::PartialAdded {
                hash: transaction_hash(channel, &data)?,
            },
            "partialRemoved" => ListenerEvent::PartialRemoved {
                hash: transaction_hash(channel, &data)?,
            },
            "status" => ListenerEvent::Status(TransactionStatusError {
                raw_address: parameter.to_string(),
                hash: transaction_hash(channel, &data)?,
                code: data
                    .get("code")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                deadline: data.get("deadline").and_then(crate::models::common::value_as_u64),
            }),
            "cosignature" => ListenerEvent::Cosignature(serde_json::from_value(data).map_err(|error| {
                ProtocolError::MalformedMessage {
                    message: format!("cosignature event: {error}"),
                }
            })?),
            other => {
                return Err(ProtocolError::UnsupportedChannel {
                    channel: other.to_string(),
                })
            }
        };
        Ok(event)
    }
}

/// Handlers keyed by channel name; a second handler for a name replaces the first
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Handler>,
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("channels", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HandlerTable {
    pub fn insert(&mut self, channel: impl Into<String>, handler: Handler) {
        self.handlers.insert(channel.into(), handler);
    }

    pub fn contains(&self, channel: &str) -> bool {
        self.handlers.contains_key(channel)
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Routes one `{topic, data}` message.
    ///
    /// Returns `Ok(false)` when no handler is registered for the channel. A
    /// registered channel this client cannot decode is an
    /// [`ProtocolError::UnsupportedChannel`].
    pub fn dispatch(&mut self, topic: &str, data: Value) -> std::result::Result<bool, ProtocolError> {
        let (channel, parameter) = topic.split_once('/').unwrap_or((topic, ""));
        let Some(handler) = self.handlers.get_mut(channel) else {
            debug!(%topic, "no handler for topic");
            return Ok(false);
        };
        let event = ListenerEvent::decode(channel, parameter, data)?;
        handler(event);
        Ok(true)
    }
}

/// Connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Closed,
    Connecting,
    /// Socket open, waiting for the node's `uid`
    Handshake,
    Open,
}

/// Reported to the close callback when the node or network ends the connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseEvent {
    /// Session uid negotiated by the handshake
    pub client: String,
    pub code: u16,
    pub reason: String,
}

/// Closes a listener from another task, including while `open` is pending
#[derive(Debug, Clone)]
pub struct CloseHandle {
    closing: Arc<watch::Sender<bool>>,
}

impl CloseHandle {
    pub fn close(&self) {
        self.closing.send_replace(true);
    }
}

enum Command {
    Subscribe {
        name: String,
        topic: String,
        handler: Handler,
    },
}

struct Connection {
    /// Set once the handshake completed
    uid: Option<String>,
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ListenerState>,
    task: JoinHandle<()>,
}

/// Channel-multiplexed WebSocket client of one node
pub struct Listener {
    url: Url,
    closing: Arc<watch::Sender<bool>>,
    connection: Option<Connection>,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("url", &self.url.as_str())
            .field("uid", &self.uid())
            .field("state", &self.state())
            .finish()
    }
}

impl Listener {
    /// Listener of the WebSocket endpoint `url`
    pub fn new(url: Url) -> Self {
        let (closing, _) = watch::channel(false);
        Self {
            url,
            closing: Arc::new(closing),
            connection: None,
        }
    }

    /// Listener of the configured node's `/ws` endpoint
    pub fn for_properties(properties: &NetworkProperties) -> Result<Self> {
        Ok(Self::new(properties.websocket_url()?))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle {
            closing: Arc::clone(&self.closing),
        }
    }

    /// Session id negotiated by the last successful `open`
    pub fn uid(&self) -> Option<&str> {
        self.connection
            .as_ref()
            .filter(|connection| !connection.task.is_finished())
            .and_then(|connection| connection.uid.as_deref())
    }

    pub fn state(&self) -> ListenerState {
        self.connection
            .as_ref()
            .map(|connection| *connection.state.borrow())
            .unwrap_or(ListenerState::Closed)
    }

    pub fn is_open(&self) -> bool {
        self.state() == ListenerState::Open
    }

    /// Connects and waits for the handshake, returning the session uid.
    ///
    /// An already open connection is reused. If the node closes the connection
    /// before the handshake, the returned future fails with
    /// [`ClientError::ConnectionClosed`] and `on_close` is not invoked.
    /// Closing through a [`CloseHandle`] while the handshake is pending leaves
    /// the future pending forever; callers that need a bound race it against a
    /// timeout. A connection left behind by such an abandoned `open` is closed
    /// by the next `open`, by [`Listener::close`] or when the listener is dropped.
    ///
    /// `on_close` is invoked when the node or network ends the connection after
    /// the handshake.
    pub async fn open(&mut self, on_close: Option<CloseCallback>) -> Result<String> {
        if let Some(uid) = self.uid() {
            return Ok(uid.to_string());
        }
        if let Some(stale) = self.connection.take() {
            debug!("closing connection without completed handshake");
            self.closing.send_replace(true);
            if let Err(error) = stale.task.await {
                warn!(%error, "listener task ended abnormally");
            }
        }
        self.closing.send_replace(false);

        let (state_tx, state_rx) = watch::channel(ListenerState::Connecting);
        info!(url = %self.url, "opening listener");
        let (socket, _) = connect_async(self.url.as_str()).await?;
        state_tx.send_replace(ListenerState::Handshake);

        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (handshake_tx, handshake_rx) = oneshot::channel();
        let session = Session {
            socket,
            uid: None,
            handshake: Some(handshake_tx),
            on_close,
            handlers: HandlerTable::default(),
            state: state_tx,
        };
        let task = tokio::spawn(session.run(commands_rx, self.closing.subscribe()));
        self.connection = Some(Connection {
            uid: None,
            commands: commands_tx,
            state: state_rx,
            task,
        });

        match handshake_rx.await {
            Ok(Ok(uid)) => {
                if let Some(connection) = self.connection.as_mut() {
                    connection.uid = Some(uid.clone());
                }
                Ok(uid)
            }
            Ok(Err(error)) => {
                self.connection = None;
                Err(error)
            }
            Err(_) => {
                debug!("listener closed during handshake, open stays pending");
                std::future::pending::<()>().await;
                Err(ClientError::Cancelled)
            }
        }
    }

    /// Registers `handler` for `channel` and sends the subscribe request.
    ///
    /// No acknowledgement is awaited.
    pub fn subscribe<F>(&self, channel: Channel, handler: F) -> Result<()>
    where
        F: FnMut(ListenerEvent) + Send + 'static,
    {
        self.send_subscribe(channel.name().to_string(), channel.topic(), Box::new(handler))
    }

    /// Subscribes to a `name[/parameter]` topic given verbatim.
    ///
    /// Events of a channel this client cannot decode end the connection with a
    /// protocol error.
    pub fn subscribe_topic<F>(&self, topic: &str, handler: F) -> Result<()>
    where
        F: FnMut(ListenerEvent) + Send + 'static,
    {
        let name = topic.split_once('/').map_or(topic, |(name, _)| name);
        self.send_subscribe(name.to_string(), topic.to_string(), Box::new(handler))
    }

    fn send_subscribe(&self, name: String, topic: String, handler: Handler) -> Result<()> {
        let connection = self
            .connection
            .as_ref()
            .filter(|connection| connection.uid.is_some() && !connection.task.is_finished())
            .ok_or(ProtocolError::NotConnected)?;
        connection
            .commands
            .send(Command::Subscribe { name, topic, handler })
            .map_err(|_| ProtocolError::NotConnected)?;
        Ok(())
    }

    /// Closes the connection; the close callback is not invoked
    pub async fn close(&mut self) {
        self.closing.send_replace(true);
        if let Some(connection) = self.connection.take() {
            if let Err(error) = connection.task.await {
                warn!(%error, "listener task ended abnormally");
            }
        }
    }
}

struct Session {
    socket: Socket,
    uid: Option<String>,
    handshake: Option<oneshot::Sender<Result<String>>>,
    on_close: Option<CloseCallback>,
    handlers: HandlerTable,
    state: watch::Sender<ListenerState>,
}

impl Session {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>, mut closing: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                changed = closing.changed() => {
                    if changed.is_err() || *closing.borrow() {
                        self.shutdown().await;
                        return;
                    }
                }
                command = commands.recv() => match command {
                    Some(Command::Subscribe { name, topic, handler }) => self.subscribe(name, topic, handler).await,
                    None => {
                        self.shutdown().await;
                        return;
                    }
                },
                message = self.socket.next() => match message {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(protocol) = self.receive(&text) {
                            error!(error = %protocol, "listener protocol error");
                            let frame = CloseFrame {
                                code: CloseCode::Protocol,
                                reason: protocol.to_string().into(),
                            };
                            if let Err(error) = self.socket.close(Some(frame)).await {
                                debug!(%error, "closing socket after protocol error");
                            }
                            self.disconnected(PROTOCOL_ERROR_CODE, protocol.to_string());
                            return;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = frame
                            .map(|frame| (u16::from(frame.code), frame.reason.into_owned()))
                            .unwrap_or((NO_STATUS_CODE, String::new()));
                        self.disconnected(code, reason);
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        self.disconnected(ABNORMAL_CLOSE_CODE, error.to_string());
                        return;
                    }
                    None => {
                        self.disconnected(ABNORMAL_CLOSE_CODE, "connection lost".to_string());
                        return;
                    }
                },
            }
        }
    }

    fn receive(&mut self, text: &str) -> std::result::Result<(), ProtocolError> {
        let message: Value = match serde_json::from_str(text) {
            Ok(message) => message,
            Err(error) => {
                warn!(%error, "ignoring non-JSON listener message");
                return Ok(());
            }
        };

        if self.uid.is_none() {
            match message.get("uid").and_then(Value::as_str) {
                Some(uid) => {
                    info!(uid, "listener handshake complete");
                    self.uid = Some(uid.to_string());
                    self.state.send_replace(ListenerState::Open);
                    if let Some(handshake) = self.handshake.take() {
                        let _ = handshake.send(Ok(uid.to_string()));
                    }
                }
                None => debug!("ignoring message received before handshake"),
            }
            return Ok(());
        }

        let Some(topic) = message.get("topic").and_then(Value::as_str) else {
            debug!("ignoring listener message without topic");
            return Ok(());
        };
        let data = message.get("data").cloned().unwrap_or(Value::Null);
        match self.handlers.dispatch(topic, data) {
            Ok(_) => Ok(()),
            Err(error @ ProtocolError::UnsupportedChannel { .. }) => Err(error),
            Err(error) => {
                warn!(%topic, %error, "dropping malformed listener event");
                Ok(())
            }
        }
    }

    async fn subscribe(&mut self, name: String, topic: String, handler: Handler) {
        self.handlers.insert(name, handler);
        let Some(uid) = self.uid.as_deref() else {
            return;
        };
        let request = json!({ "uid": uid, "subscribe": topic });
        match self.socket.send(Message::Text(request.to_string())).await {
            Ok(()) => debug!(%topic, "subscribed"),
            Err(error) => warn!(%topic, %error, "subscribe request failed"),
        }
    }

    /// Intentional close; the close callback is not invoked
    async fn shutdown(&mut self) {
        info!(uid = ?self.uid, "closing listener");
        self.state.send_replace(ListenerState::Closed);
        self.handlers.clear();
        if let Err(error) = self.socket.close(None).await {
            debug!(%error, "closing listener socket");
        }
    }

    /// Close not requested by this client.
    ///
    /// Before the handshake the pending `open` fails and the close callback is
    /// dropped unused; afterwards only the callback hears about it.
    fn disconnected(&mut self, code: u16, reason: String) {
        self.state.send_replace(ListenerState::Closed);
        self.handlers.clear();
        let client = self.uid.clone().unwrap_or_default();
        warn!(%client, code, %reason, "listener connection closed by peer");

        if let Some(handshake) = self.handshake.take() {
            self.on_close = None;
            let _ = handshake.send(Err(ClientError::ConnectionClosed { code, reason }));
            return;
        }
        match self.on_close.take() {
            Some(callback) => callback(CloseEvent { client, code, reason }),
            None => warn!("connection closed with no close callback registered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use symbol_core::{NetworkType, PublicKey};

    fn recorder() -> (Arc<Mutex<Vec<ListenerEvent>>>, Handler) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        (
            events,
            Box::new(move |event| sink.lock().unwrap().push(event)),
        )
    }

    #[test]
    fn topics_carry_plain_address() {
        let address = Address::from_public_key(&PublicKey::from_bytes([3; 32]), NetworkType::TestNet);
        assert_eq!(Channel::Block.topic(), "block");
        assert_eq!(
            Channel::Status(address).topic(),
            format!("status/{}", address.plain())
        );
    }

    #[test]
    fn unregistered_channel_is_dropped() {
        let mut table = HandlerTable::default();
        let (events, handler) = recorder();
        table.insert("block", handler);

        let routed = table.dispatch("confirmedAdded/TADDR", json!({"meta": {"hash": "AA"}}));
        assert_eq!(routed, Ok(false));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn unsupported_channel_with_handler_is_an_error() {
        let mut table = HandlerTable::default();
        let (events, handler) = recorder();
        table.insert("mystery", handler);

        let routed = table.dispatch("mystery/X", json!({}));
        assert_eq!(
            routed,
            Err(ProtocolError::UnsupportedChannel {
                channel: "mystery".to_string()
            })
        );
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn events_are_reshaped_per_channel() {
        let mut table = HandlerTable::default();
        let (events, handler) = recorder();
        table.insert("confirmedAdded", handler);
        let (statuses, handler) = recorder();
        table.insert("status", handler);

        table
            .dispatch("confirmedAdded/TADDR", json!({"meta": {"hash": "AA", "height": "5"}, "transaction": {}}))
            .unwrap();
        table
            .dispatch(
                "status/TADDR",
                json!({"hash": "BB", "code": "Failure_Core_Insufficient_Balance", "deadline": "77"}),
            )
            .unwrap();

        assert_eq!(
            events.lock().unwrap().as_slice(),
            [ListenerEvent::ConfirmedAdded { hash: "AA".to_string() }]
        );
        assert_eq!(
            statuses.lock().unwrap().as_slice(),
            [ListenerEvent::Status(TransactionStatusError {
                raw_address: "TADDR".to_string(),
                hash: "BB".to_string(),
                code: "Failure_Core_Insufficient_Balance".to_string(),
                deadline: Some(77),
            })]
        );
    }

    #[test]
    fn second_subscription_replaces_handler() {
        let mut table = HandlerTable::default();
        let (first, handler) = recorder();
        table.insert("block", handler);
        let (second, handler) = recorder();
        table.insert("block", handler);

        table.dispatch("block", json!({"height": "1"})).unwrap();
        assert!(first.lock().unwrap().is_empty());
        assert_eq!(second.lock().unwrap().len(), 1);
    }

    #[test]
    fn subscribe_requires_open_connection() {
        let listener = Listener::new(Url::parse("ws://localhost:3000/ws").unwrap());
        assert_eq!(listener.state(), ListenerState::Closed);
        assert!(matches!(
            listener.subscribe(Channel::Block, |_| {}),
            Err(ClientError::Protocol(ProtocolError::NotConnected))
        ));
    }
}
