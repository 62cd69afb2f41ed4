//! Commit/reveal store.
//!
//! [`CommitStore`] is the single writer of a player's commitments. It draws
//! salts, builds the moves hash, persists the record per duel and round, and
//! announces new commitments on the event bus.

use std::sync::{Arc, Mutex};

use duel_core::{
    DuelId, Moves, RandomSalt, RoundNumber, Salt, SaltSource, make_moves_hash,
};

use crate::error::{Result, StoreError};
use crate::events::{CommitEvent, EventBus, LifecycleEvent, RevealEvent};
use crate::repository::{CommitRecord, CommitRepository, InMemoryCommitRepo};

/// Data needed by the reveal transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealPayload {
    pub salt: Salt,
    pub moves: Moves,
}

/// Commit/reveal service for the local duelist.
pub struct CommitStore {
    repository: Arc<dyn CommitRepository>,
    salts: Mutex<Box<dyn SaltSource>>,
    events: EventBus,
}

impl CommitStore {
    /// Create a new store builder
    pub fn builder() -> CommitStoreBuilder {
        CommitStoreBuilder::new()
    }

    /// Event bus carrying this store's events
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Read the commitment stored for a duel round.
    ///
    /// Absent or malformed records read as `None`, meaning "no commitment yet".
    pub fn commit_move(&self, duel_id: &DuelId, round: RoundNumber) -> Result<Option<CommitRecord>> {
        Ok(self.repository.load(duel_id, round)?)
    }

    /// Commit a single selected move for a duel round.
    ///
    /// See [`CommitStore::make_commit_moves`].
    pub fn make_commit_move(
        &self,
        duel_id: &DuelId,
        round: RoundNumber,
        selected_move: u8,
    ) -> Result<Option<CommitRecord>> {
        self.make_commit_moves(duel_id, round, &[selected_move])
    }

    /// Commit a hand of moves for a duel round, then read it back.
    ///
    /// - A blank selection leaves storage untouched.
    /// - Repeating the stored selection keeps the stored salt and hash.
    /// - A different selection draws a fresh salt (re-roll) and replaces the
    ///   record, unless the round was already submitted or revealed.
    pub fn make_commit_moves(
        &self,
        duel_id: &DuelId,
        round: RoundNumber,
        moves: &[u8],
    ) -> Result<Option<CommitRecord>> {
        let moves = Moves::from_slice(moves);
        if moves.is_blank() {
            return self.commit_move(duel_id, round);
        }

        let existing = self.repository.load(duel_id, round)?;
        if let Some(record) = &existing {
            if record.moves == moves {
                tracing::debug!(
                    "Commit for duel {} round {} unchanged, keeping salt",
                    duel_id.to_hex_string(),
                    round
                );
                return Ok(existing);
            }
            if record.revealed {
                return Err(StoreError::AlreadyRevealed {
                    duel_id: duel_id.to_hex_string(),
                    round,
                });
            }
            if record.submitted {
                return Err(StoreError::AlreadySubmitted {
                    duel_id: duel_id.to_hex_string(),
                    round,
                });
            }
        }

        let salt = self
            .salts
            .lock()
            .map_err(|_| StoreError::SaltSourcePoisoned)?
            .next_salt();

        let Some(hash) = make_moves_hash(&salt, moves.as_slice()) else {
            tracing::warn!(
                "Salt unavailable for duel {} round {}, commitment not ready",
                duel_id.to_hex_string(),
                round
            );
            return self.commit_move(duel_id, round);
        };

        let record = CommitRecord::new(moves, salt, hash);
        self.repository.save(duel_id, round, &record)?;

        tracing::info!(
            "Committed duel {} round {}: hash={}",
            duel_id.to_hex_string(),
            round,
            hash
        );
        self.events.publish(CommitEvent::Committed {
            duel_id: *duel_id,
            round,
            hash,
            rerolled: existing.is_some(),
        });

        self.commit_move(duel_id, round)
    }

    /// Salt and moves to submit with the reveal transaction.
    pub fn reveal(&self, duel_id: &DuelId, round: RoundNumber) -> Result<Option<RevealPayload>> {
        Ok(self
            .commit_move(duel_id, round)?
            .map(|record| RevealPayload {
                salt: record.salt,
                moves: record.moves,
            }))
    }

    /// Flag a round as committed on-chain, freezing its selection.
    ///
    /// Returns false if there is no record for the round.
    pub fn mark_submitted(&self, duel_id: &DuelId, round: RoundNumber) -> Result<bool> {
        let Some(mut record) = self.repository.load(duel_id, round)? else {
            return Ok(false);
        };
        if !record.submitted {
            record.submitted = true;
            self.repository.save(duel_id, round, &record)?;
            tracing::debug!("Submitted duel {} round {}", duel_id.to_hex_string(), round);
        }
        Ok(true)
    }

    /// Flag a round as revealed once the chain accepted the reveal.
    ///
    /// Returns false if there is no record for the round.
    pub fn mark_revealed(&self, duel_id: &DuelId, round: RoundNumber) -> Result<bool> {
        let Some(mut record) = self.repository.load(duel_id, round)? else {
            return Ok(false);
        };
        if record.revealed {
            return Ok(true);
        }

        record.revealed = true;
        self.repository.save(duel_id, round, &record)?;

        tracing::info!("Revealed duel {} round {}", duel_id.to_hex_string(), round);
        self.events.publish(RevealEvent::Revealed {
            duel_id: *duel_id,
            round,
            moves: record.moves,
        });
        Ok(true)
    }

    /// Drop a round's commitment, e.g. when the round restarts.
    pub fn clear_round(&self, duel_id: &DuelId, round: RoundNumber) -> Result<bool> {
        let removed = self.repository.delete(duel_id, round)?;
        if removed {
            tracing::info!("Cleared duel {} round {}", duel_id.to_hex_string(), round);
            self.events.publish(CommitEvent::Cleared {
                duel_id: *duel_id,
                round,
            });
        }
        Ok(removed)
    }

    /// Round numbers with a stored commitment for a duel.
    pub fn rounds(&self, duel_id: &DuelId) -> Result<Vec<RoundNumber>> {
        Ok(self.repository.list_rounds(duel_id)?)
    }

    /// Duels with at least one stored commitment.
    pub fn duels(&self) -> Result<Vec<DuelId>> {
        Ok(self.repository.list_duels()?)
    }

    /// Announce shutdown to subscribers.
    pub fn shutdown(&self) {
        tracing::info!("Commit store shutting down");
        self.events.publish(LifecycleEvent::ShuttingDown);
    }
}

/// Builder for [`CommitStore`].
///
/// Defaults: in-memory repository, OS-seeded random salts, a fresh event bus
/// with 100 slots per topic.
pub struct CommitStoreBuilder {
    repository: Option<Arc<dyn CommitRepository>>,
    salts: Option<Box<dyn SaltSource>>,
    events: Option<EventBus>,
    event_capacity: usize,
}

impl CommitStoreBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            salts: None,
            events: None,
            event_capacity: 100,
        }
    }

    pub fn repository(mut self, repository: Arc<dyn CommitRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn salt_source(mut self, source: impl SaltSource + 'static) -> Self {
        self.salts = Some(Box::new(source));
        self
    }

    /// Share an existing bus instead of creating one.
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn build(self) -> CommitStore {
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryCommitRepo::new()));
        let salts = self
            .salts
            .unwrap_or_else(|| Box::new(RandomSalt::new()));
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.event_capacity));

        CommitStore {
            repository,
            salts: Mutex::new(salts),
            events,
        }
    }
}

impl Default for CommitStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use duel_core::{FixedSalt, Felt, verify_moves_hash};

    use super::*;
    use crate::events::{Event, Topic};

    fn store() -> CommitStore {
        CommitStore::builder().salt_source(RandomSalt::seeded(1)).build()
    }

    #[test]
    fn test_commit_then_read_back() {
        let store = store();
        let duel = Felt::from(0xABCu64);

        let made = store.make_commit_move(&duel, 1, 3).unwrap().unwrap();
        let read = store.commit_move(&duel, 1).unwrap().unwrap();

        assert_eq!(made, read);
        assert_eq!(read.selected_move(), 3);
        assert!(read.salt.is_set());
        assert!(verify_moves_hash(&read.salt, &[3], read.hash));
    }

    #[test]
    fn test_same_selection_keeps_salt() {
        let store = store();
        let duel = Felt::from(0xABCu64);

        let first = store.make_commit_move(&duel, 1, 3).unwrap().unwrap();
        let again = store.make_commit_move(&duel, 1, 3).unwrap().unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_padded_selection_keeps_salt() {
        let store = store();
        let duel = Felt::from(0xABCu64);

        let first = store.make_commit_move(&duel, 1, 3).unwrap().unwrap();
        let padded = store.make_commit_moves(&duel, 1, &[3, 0, 0, 0]).unwrap().unwrap();
        assert_eq!(first.salt, padded.salt);
        assert_eq!(first.hash, padded.hash);
    }

    #[test]
    fn test_submitted_selection_is_frozen() {
        let store = store();
        let duel = Felt::from(0xABCu64);

        let record = store.make_commit_move(&duel, 1, 3).unwrap().unwrap();
        assert!(store.mark_submitted(&duel, 1).unwrap());
        assert!(!store.mark_submitted(&duel, 2).unwrap());

        let again = store.make_commit_move(&duel, 1, 3).unwrap().unwrap();
        assert_eq!(again.hash, record.hash);
        assert!(again.submitted);

        assert!(matches!(
            store.make_commit_move(&duel, 1, 4),
            Err(StoreError::AlreadySubmitted { round: 1, .. })
        ));
        let kept = store.commit_move(&duel, 1).unwrap().unwrap();
        assert_eq!(kept.selected_move(), 3);
        assert!(verify_moves_hash(&kept.salt, &[3], record.hash));
    }

    #[test]
    fn test_build_does_not_announce_start() {
        let events = EventBus::with_capacity(4);
        let mut lifecycle = events.subscribe(Topic::Lifecycle);
        let _store = CommitStore::builder().event_bus(events).build();
        assert!(lifecycle.try_recv().is_err());
    }

    #[test]
    fn test_new_selection_rerolls() {
        let store = store();
        let duel = Felt::from(0xABCu64);

        let first = store.make_commit_move(&duel, 1, 3).unwrap().unwrap();
        let second = store.make_commit_move(&duel, 1, 4).unwrap().unwrap();
        assert_eq!(second.selected_move(), 4);
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.hash, second.hash);
    }

    #[test]
    fn test_blank_selection_is_a_read() {
        let store = store();
        let duel = Felt::from(1u64);
        assert_eq!(store.make_commit_move(&duel, 1, 0).unwrap(), None);

        let made = store.make_commit_move(&duel, 1, 2).unwrap();
        assert_eq!(store.make_commit_move(&duel, 1, 0).unwrap(), made);
    }

    #[test]
    fn test_unset_salt_does_not_persist() {
        let store = CommitStore::builder()
            .salt_source(FixedSalt(Salt::ZERO))
            .build();
        let duel = Felt::from(1u64);
        assert_eq!(store.make_commit_move(&duel, 1, 2).unwrap(), None);
        assert!(store.rounds(&duel).unwrap().is_empty());
    }

    #[test]
    fn test_rounds_are_independent() {
        let store = store();
        let duel = Felt::from(9u64);
        let one = store.make_commit_move(&duel, 1, 5).unwrap().unwrap();
        let two = store.make_commit_move(&duel, 2, 6).unwrap().unwrap();
        assert_eq!(store.commit_move(&duel, 1).unwrap(), Some(one));
        assert_eq!(store.commit_move(&duel, 2).unwrap(), Some(two));
        assert_eq!(store.rounds(&duel).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_reveal_flow() {
        let store = store();
        let duel = Felt::from(0xDEADu64);
        let record = store.make_commit_moves(&duel, 1, &[4, 2, 1, 3]).unwrap().unwrap();

        let payload = store.reveal(&duel, 1).unwrap().unwrap();
        assert_eq!(payload.salt, record.salt);
        assert!(verify_moves_hash(&payload.salt, payload.moves.as_slice(), record.hash));

        assert!(store.mark_revealed(&duel, 1).unwrap());
        assert!(store.commit_move(&duel, 1).unwrap().unwrap().revealed);

        // Same hand is still a plain read, a different one is refused
        assert!(store.make_commit_moves(&duel, 1, &[4, 2, 1, 3]).is_ok());
        assert!(matches!(
            store.make_commit_moves(&duel, 1, &[5, 2, 1, 3]),
            Err(StoreError::AlreadyRevealed { round: 1, .. })
        ));

        assert!(!store.mark_revealed(&duel, 2).unwrap());
        assert_eq!(store.reveal(&duel, 2).unwrap(), None);
    }

    #[test]
    fn test_events_published() {
        let store = store();
        let duel = Felt::from(3u64);
        let mut commits = store.events().subscribe(Topic::Commit);

        let first = store.make_commit_move(&duel, 1, 1).unwrap().unwrap();
        store.make_commit_move(&duel, 1, 1).unwrap();
        let second = store.make_commit_move(&duel, 1, 2).unwrap().unwrap();
        store.clear_round(&duel, 1).unwrap();

        assert_eq!(
            commits.try_recv().unwrap(),
            Event::Commit(CommitEvent::Committed {
                duel_id: duel,
                round: 1,
                hash: first.hash,
                rerolled: false
            })
        );
        assert_eq!(
            commits.try_recv().unwrap(),
            Event::Commit(CommitEvent::Committed {
                duel_id: duel,
                round: 1,
                hash: second.hash,
                rerolled: true
            })
        );
        assert_eq!(
            commits.try_recv().unwrap(),
            Event::Commit(CommitEvent::Cleared {
                duel_id: duel,
                round: 1
            })
        );
        assert!(commits.try_recv().is_err());
    }
}
