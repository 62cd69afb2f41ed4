//! Duelist client tying the local commit store to the duel contract.
//!
//! # Architecture
//!
//! ```text
//! PistolsClient
//!   ├─→ CommitStore (secret salts and moves, persisted per duel round)
//!   └─→ DuelContract (optional, receives hashes and reveals)
//! ```
//!
//! The store is always the source of truth for the secret half of a
//! commitment. The contract only ever sees the moves hash until the reveal.

mod builder;
pub mod cli;
pub mod config;
pub mod logging;

pub use builder::ClientBuilder;
pub use config::ClientConfig;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use client_blockchain_core::{DuelContract, TransactionId};
use duel_core::{DuelId, Felt, Moves, RoundNumber, make_pact_pair};
use duel_runtime::{CommitRecord, CommitStore, Event, LifecycleEvent, RevealPayload, Topic};

/// Top-level client for one local duelist.
///
/// # Lifecycle
///
/// 1. `PistolsClient::builder()` assembles the store and optional contract
/// 2. `start()` spawns a background task logging store events and announces
///    the start
/// 3. `commit()` / `reveal()` drive rounds
/// 4. `shutdown()` announces shutdown and stops the background task
pub struct PistolsClient {
    store: Arc<CommitStore>,
    contract: Option<Arc<dyn DuelContract>>,
    duelist: Felt,
    event_loggers: Vec<JoinHandle<()>>,
}

impl PistolsClient {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Address of the local duelist.
    pub fn duelist(&self) -> Felt {
        self.duelist
    }

    pub fn store(&self) -> &Arc<CommitStore> {
        &self.store
    }

    pub fn contract(&self) -> Option<&Arc<dyn DuelContract>> {
        self.contract.as_ref()
    }

    /// Spawn one logging task per event topic, then publish
    /// [`LifecycleEvent::Started`].
    ///
    /// Calling this twice is a no-op.
    pub fn start(&mut self) {
        if !self.event_loggers.is_empty() {
            return;
        }

        for (topic, mut receiver) in self.store.events().subscribe_multiple(&Topic::ALL) {
            let duelist = self.duelist;
            self.event_loggers.push(tokio::spawn(async move {
                loop {
                    match receiver.recv().await {
                        Ok(event) => log_event(&duelist, &event),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!("Event logger for {:?} skipped {} events", topic, skipped);
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }));
        }

        tracing::debug!("Event loggers started for {}", self.duelist.to_hex_string());
        self.store.events().publish(LifecycleEvent::Started);
    }

    /// Lock in a selection locally without touching the contract.
    pub fn select_moves(
        &self,
        duel_id: &DuelId,
        round: RoundNumber,
        moves: &[u8],
    ) -> Result<Option<CommitRecord>> {
        self.store
            .make_commit_moves(duel_id, round, moves)
            .with_context(|| format!("committing moves for duel {}", duel_id.to_hex_string()))
    }

    /// Commit a selection and publish its hash on-chain.
    ///
    /// When the contract already holds a commitment from this duelist, only a
    /// repeat of the stored selection is accepted and nothing is submitted. A
    /// different selection is refused before the local record is touched, so
    /// the stored salt keeps matching the on-chain hash. Returns the local
    /// record, or `None` when nothing was committed (blank selection or salt
    /// not available).
    pub async fn commit(
        &self,
        duel_id: &DuelId,
        round: RoundNumber,
        moves: &[u8],
    ) -> Result<Option<CommitRecord>> {
        let Some(contract) = &self.contract else {
            return self.select_moves(duel_id, round, moves);
        };

        if contract
            .has_committed(&self.duelist, duel_id)
            .await
            .context("querying on-chain commitment")?
        {
            return self.recommit(duel_id, round, moves);
        }

        let Some(record) = self.select_moves(duel_id, round, moves)? else {
            return Ok(None);
        };

        let tx = contract
            .commit_moves(&self.duelist, duel_id, record.hash)
            .await
            .context("submitting commitment")?;
        tracing::info!("Commit submitted for duel {}: tx={}", duel_id.to_hex_string(), tx);

        self.store.mark_submitted(duel_id, round)?;
        Ok(self.store.commit_move(duel_id, round)?)
    }

    /// Repeat of a commit the contract already holds.
    fn recommit(
        &self,
        duel_id: &DuelId,
        round: RoundNumber,
        moves: &[u8],
    ) -> Result<Option<CommitRecord>> {
        let selection = Moves::from_slice(moves);
        if selection.is_blank() {
            return Ok(self.store.commit_move(duel_id, round)?);
        }

        match self.store.commit_move(duel_id, round)? {
            Some(record) if record.moves == selection => {
                tracing::debug!(
                    "Duel {} already holds this commitment from {}",
                    duel_id.to_hex_string(),
                    self.duelist.to_hex_string()
                );
                self.store.mark_submitted(duel_id, round)?;
                Ok(self.store.commit_move(duel_id, round)?)
            }
            Some(_) => bail!(
                "duel {} round {} is already committed on-chain with a different selection",
                duel_id.to_hex_string(),
                round
            ),
            None => bail!(
                "duel {} round {} is already committed on-chain but no local record exists",
                duel_id.to_hex_string(),
                round
            ),
        }
    }

    /// Reveal a committed round.
    ///
    /// The local record is flagged revealed only after the contract accepted
    /// the reveal. Without a contract the record is flagged directly.
    pub async fn reveal(
        &self,
        duel_id: &DuelId,
        round: RoundNumber,
    ) -> Result<Option<(RevealPayload, Option<TransactionId>)>> {
        let Some(payload) = self.store.reveal(duel_id, round)? else {
            tracing::warn!(
                "Nothing to reveal for duel {} round {}",
                duel_id.to_hex_string(),
                round
            );
            return Ok(None);
        };

        let tx = match &self.contract {
            Some(contract) => Some(
                contract
                    .reveal_moves(&self.duelist, duel_id, payload.salt, &payload.moves)
                    .await
                    .context("submitting reveal")?,
            ),
            None => None,
        };

        self.store.mark_revealed(duel_id, round)?;
        Ok(Some((payload, tx)))
    }

    /// Symmetric pact id between the local duelist and another address.
    pub fn pact(&self, other: &Felt) -> u128 {
        make_pact_pair(&self.duelist, other)
    }

    /// Duel currently open against another address, if the contract knows one.
    pub async fn find_duel(&self, other: &Felt) -> Result<Option<DuelId>> {
        let Some(contract) = &self.contract else {
            return Ok(None);
        };
        Ok(contract.get_pact(&self.duelist, other).await?)
    }

    /// Announce shutdown and stop the event loggers.
    pub async fn shutdown(self) {
        self.store.shutdown();
        // Let the loggers drain the shutdown event before stopping them
        tokio::task::yield_now().await;

        for task in self.event_loggers {
            task.abort();
            let _ = task.await;
        }
        tracing::info!("Client shutdown complete");
    }
}

fn log_event(duelist: &Felt, event: &Event) {
    use duel_runtime::{CommitEvent, RevealEvent};

    let who = duelist.to_hex_string();
    match event {
        Event::Commit(CommitEvent::Committed {
            duel_id,
            round,
            hash,
            rerolled,
        }) => tracing::info!(
            "[{}] commit duel={} round={} hash={} rerolled={}",
            who,
            duel_id.to_hex_string(),
            round,
            hash,
            rerolled
        ),
        Event::Commit(CommitEvent::Cleared { duel_id, round }) => {
            tracing::info!("[{}] cleared duel={} round={}", who, duel_id.to_hex_string(), round)
        }
        Event::Reveal(RevealEvent::Revealed {
            duel_id,
            round,
            moves,
        }) => tracing::info!(
            "[{}] revealed duel={} round={} moves={:?}",
            who,
            duel_id.to_hex_string(),
            round,
            moves.as_slice()
        ),
        Event::Lifecycle(LifecycleEvent::Started) => tracing::debug!("[{}] client started", who),
        Event::Lifecycle(LifecycleEvent::ShuttingDown) => {
            tracing::debug!("[{}] store shutting down", who)
        }
    }
}
