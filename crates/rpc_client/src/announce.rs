// Copyright (C) 2021-2025 The Symbol Toolkit Authors.
//
// announce.rs file belongs to the symbol-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Announcement Workflow.
//!
//! Single transactions are raced against the configured node and a few
//! randomly sampled known nodes. Multi-stage bundles are announced one stage at
//! a time, waiting for each stage to be confirmed before the next goes out.

use crate::codec::{domain_to_sdk, CodecConfig};
use crate::error::NodeFailure;
use crate::models::AnnounceResponse;
use crate::resolver::ResolvedData;
use crate::rest_client::{AnnounceGroup, RestClient};
use crate::{ClientError, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use rand::seq::IteratorRandom;
use std::time::Duration;
use symbol_config::{AnnounceConfig, NetworkProperties};
use symbol_core::{
    BundleType, Deadline, PrivateKey, SignedTransaction, SymbolSdk, Transaction, TransactionBundle,
    TransactionGroup,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Hours until the deadline of transactions built by [`create_bundle`]
pub const DEFAULT_DEADLINE_HOURS: u32 = 2;

/// Stage of a sequential announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingAnnounce(usize),
    AwaitingConfirmation(usize),
    Done,
}

/// Announces signed transactions to a node and its peers
#[derive(Debug, Clone)]
pub struct Announcer {
    client: RestClient,
    peers: Vec<RestClient>,
    extra_nodes: usize,
    poll_interval: Duration,
}

impl Announcer {
    /// Announcer for the configured node of `properties`; peers share its connection pool
    pub fn new(client: RestClient, properties: &NetworkProperties, config: &AnnounceConfig) -> Self {
        let peers = properties
            .other_nodes()
            .map(|node| client.for_node(node.clone()))
            .collect();
        Self {
            client,
            peers,
            extra_nodes: config.extra_nodes,
            poll_interval: config.poll_interval(),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Configured node plus up to `extra_nodes` distinct peers
    fn targets(&self) -> Vec<&RestClient> {
        let mut rng = rand::thread_rng();
        let mut targets = vec![&self.client];
        targets.extend(self.peers.iter().choose_multiple(&mut rng, self.extra_nodes));
        targets
    }

    /// Broadcasts `transaction` to every target concurrently.
    ///
    /// Resolves with the first acceptance; fails with
    /// [`ClientError::AllNodesRejected`] once every target has rejected it.
    pub async fn announce_transaction(
        &self,
        transaction: &SignedTransaction,
        group: AnnounceGroup,
    ) -> Result<AnnounceResponse> {
        let targets = self.targets();
        debug!(hash = transaction.hash(), nodes = targets.len(), ?group, "announcing transaction");

        let mut attempts: FuturesUnordered<_> = targets
            .into_iter()
            .map(|client| async move { (client.base_url(), client.announce(group, transaction).await) })
            .collect();

        let mut failures = Vec::new();
        while let Some((node, outcome)) = attempts.next().await {
            match outcome {
                Ok(response) => {
                    info!(hash = transaction.hash(), %node, "transaction accepted");
                    return Ok(response);
                }
                Err(error) => {
                    warn!(hash = transaction.hash(), %node, %error, "node rejected transaction");
                    failures.push(NodeFailure {
                        node: node.to_string(),
                        error: error.to_string(),
                    });
                }
            }
        }
        Err(ClientError::AllNodesRejected { failures })
    }

    /// Announces `transactions` in order, waiting for each to be confirmed
    /// before announcing the next. The last one goes to `final_group` and is
    /// not awaited.
    ///
    /// A stage whose status ends in the `failed` group aborts the sequence with
    /// [`ClientError::BundleStageFailed`]. Setting `cancel` to `true` aborts it
    /// with [`ClientError::Cancelled`] at the next suspension point.
    pub async fn announce_transactions_sequentially(
        &self,
        transactions: &[SignedTransaction],
        final_group: AnnounceGroup,
        mut cancel: Option<watch::Receiver<bool>>,
    ) -> Result<()> {
        let Some(last) = transactions.len().checked_sub(1) else {
            return Ok(());
        };
        let mut stage = Stage::AwaitingAnnounce(0);

        loop {
            if is_cancelled(&cancel) {
                info!(?stage, "sequential announcement cancelled");
                return Err(ClientError::Cancelled);
            }
            stage = match stage {
                Stage::AwaitingAnnounce(index) => {
                    let group = if index == last {
                        final_group
                    } else {
                        AnnounceGroup::Default
                    };
                    self.announce_transaction(&transactions[index], group).await?;
                    if index == last {
                        Stage::Done
                    } else {
                        Stage::AwaitingConfirmation(index)
                    }
                }
                Stage::AwaitingConfirmation(index) => {
                    let hash = transactions[index].hash();
                    match self.client.fetch_transaction_status(hash).await? {
                        Some(status) if status.group == TransactionGroup::Confirmed.as_str() => {
                            info!(index, hash, "bundle stage confirmed");
                            Stage::AwaitingAnnounce(index + 1)
                        }
                        Some(status) if status.group == TransactionGroup::Failed.as_str() => {
                            warn!(index, hash, code = %status.code, "bundle stage failed");
                            return Err(ClientError::BundleStageFailed {
                                index,
                                hash: hash.to_string(),
                                group: status.group,
                                code: status.code,
                            });
                        }
                        status => {
                            debug!(index, hash, group = ?status.map(|status| status.group), "waiting for confirmation");
                            self.wait(&mut cancel).await?;
                            stage
                        }
                    }
                }
                Stage::Done => return Ok(()),
            };
        }
    }

    async fn wait(&self, cancel: &mut Option<watch::Receiver<bool>>) -> Result<()> {
        let Some(receiver) = cancel.as_mut() else {
            tokio::time::sleep(self.poll_interval).await;
            return Ok(());
        };
        let sender_dropped = tokio::select! {
            _ = tokio::time::sleep(self.poll_interval) => false,
            changed = receiver.changed() => {
                if changed.is_err() {
                    true
                } else if *receiver.borrow() {
                    return Err(ClientError::Cancelled);
                } else {
                    false
                }
            }
        };
        // Nobody can cancel any more; keep polling at the regular interval
        if sender_dropped {
            *cancel = None;
        }
        Ok(())
    }

    /// Announces a bundle with the policy its type calls for.
    ///
    /// Multisig transfers are sequential and end in the partial group. Every
    /// other bundle is announced concurrently to the default group and fails if
    /// any transaction is rejected.
    pub async fn announce_transaction_bundle(
        &self,
        bundle: &TransactionBundle,
        cancel: Option<watch::Receiver<bool>>,
    ) -> Result<()> {
        info!(kind = ?bundle.bundle_type(), transactions = bundle.len(), "announcing bundle");
        match bundle.bundle_type() {
            BundleType::MultisigTransfer => {
                self.announce_transactions_sequentially(&bundle.transactions, AnnounceGroup::Partial, cancel)
                    .await
            }
            BundleType::Default => {
                let announces = bundle
                    .transactions
                    .iter()
                    .map(|transaction| self.announce_transaction(transaction, AnnounceGroup::Default));
                futures::future::try_join_all(announces).await?;
                Ok(())
            }
        }
    }
}

fn is_cancelled(cancel: &Option<watch::Receiver<bool>>) -> bool {
    cancel.as_ref().is_some_and(|receiver| *receiver.borrow())
}

/// Converts domain transactions to SDK objects, refreshes fee-less deadlines and signs them.
///
/// Top-level transactions without a deadline get one [`DEFAULT_DEADLINE_HOURS`]
/// from now.
pub fn create_bundle(
    sdk: &dyn SymbolSdk,
    transactions: &[Transaction],
    key: &PrivateKey,
    properties: &NetworkProperties,
    bundle_type: BundleType,
) -> Result<TransactionBundle> {
    let resolved = ResolvedData::default();
    let config = CodecConfig::new(properties, &resolved);
    let signed = transactions
        .iter()
        .map(|transaction| {
            let mut sdk_transaction = domain_to_sdk(transaction, &config)?;
            if transaction.deadline.is_none() {
                let deadline =
                    Deadline::after_hours(chrono::Utc::now(), DEFAULT_DEADLINE_HOURS, properties.epoch_adjustment);
                sdk_transaction.deadline = deadline.timestamp;
            }
            let signed = sdk.sign(&sdk_transaction, key)?;
            debug!(hash = signed.hash(), "signed bundle transaction");
            Ok(signed)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TransactionBundle::new(signed, bundle_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::fixtures::{account, properties};
    use std::sync::Mutex;
    use symbol_core::transaction::TransferBody;
    use symbol_core::{Decimal, SdkTransaction, TransactionBody};
    use url::Url;

    #[derive(Default)]
    struct RecordingSdk {
        signed: Mutex<Vec<SdkTransaction>>,
    }

    impl SymbolSdk for RecordingSdk {
        fn sign(&self, transaction: &SdkTransaction, _key: &PrivateKey) -> symbol_core::Result<SignedTransaction> {
            let mut signed = self.signed.lock().unwrap();
            signed.push(transaction.clone());
            let mut hash = [0u8; 32];
            hash[0] = signed.len() as u8;
            Ok(SignedTransaction::new(vec![signed.len() as u8], hash))
        }

        fn deserialize(&self, _payload: &[u8]) -> symbol_core::Result<SdkTransaction> {
            Err(symbol_core::CoreError::Sdk("not supported".to_string()))
        }
    }

    #[test]
    fn targets_never_repeat_nodes() {
        let mut properties = properties();
        properties.known_nodes = vec![
            Url::parse("http://localhost:3000").unwrap(),
            Url::parse("http://peer-a:3000").unwrap(),
            Url::parse("http://peer-b:3000").unwrap(),
        ];
        let client = RestClient::new(properties.node_url.clone()).unwrap();
        let announcer = Announcer::new(client, &properties, &AnnounceConfig::default());

        let targets: Vec<_> = announcer.targets().iter().map(|client| client.base_url().to_string()).collect();
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0], "http://localhost:3000/");
        assert!(targets.contains(&"http://peer-a:3000/".to_string()));
        assert!(targets.contains(&"http://peer-b:3000/".to_string()));
    }

    #[test]
    fn bundle_fills_missing_deadlines() {
        let properties = properties();
        let (signer_public_key, signer_address) = account(5);
        let (_, recipient) = account(6);
        let transaction = Transaction {
            signer_public_key,
            signer_address,
            fee: Some(Decimal::new(5, 2)),
            deadline: None,
            meta: None,
            body: TransactionBody::Transfer(TransferBody {
                recipient_address: recipient,
                mosaics: Vec::new(),
                message: None,
                amount: Decimal::ZERO,
            }),
        };
        let sdk = RecordingSdk::default();
        let key = PrivateKey::from_bytes([9; 32]);

        let bundle = create_bundle(&sdk, &[transaction.clone(), transaction], &key, &properties, BundleType::MultisigTransfer)
            .unwrap();

        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.bundle_type(), BundleType::MultisigTransfer);
        let signed = sdk.signed.lock().unwrap();
        assert!(signed.iter().all(|sdk_transaction| sdk_transaction.deadline > 0));
        assert_eq!(signed[0].fee, 50_000);
    }
}
