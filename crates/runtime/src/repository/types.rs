//! Persisted commit record and the per-duel document that holds it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use duel_core::{MoveSlot, Moves, MovesHash, RoundNumber, Salt};

use super::error::Result;

/// Secret commitment for one round.
///
/// `hash` is published on-chain; `salt` and `moves` stay local until reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub moves: Moves,
    pub salt: Salt,
    pub hash: MovesHash,
    /// Set once the hash was accepted on-chain. The selection is frozen
    /// from then on.
    #[serde(default)]
    pub submitted: bool,
    /// Set once the reveal transaction is confirmed.
    #[serde(default)]
    pub revealed: bool,
}

impl CommitRecord {
    pub fn new(moves: Moves, salt: Salt, hash: MovesHash) -> Self {
        Self {
            moves,
            salt,
            hash,
            submitted: false,
            revealed: false,
        }
    }

    /// Move in the first slot, the single selection of a one-card round.
    pub fn selected_move(&self) -> u8 {
        self.moves.get(MoveSlot::Fire)
    }
}

/// All rounds stored for one duel.
///
/// Keys and rounds are kept as raw JSON so that one malformed entry does not
/// hide the others, and is written back untouched when a sibling round is
/// saved. Decoding happens per round on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DuelDocument(BTreeMap<String, serde_json::Value>);

impl DuelDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a round. Malformed entries read as absent.
    pub fn get(&self, round: RoundNumber) -> Option<CommitRecord> {
        let value = self.0.get(&round.to_string())?;
        match serde_json::from_value(value.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("ignoring malformed commit for round {}: {}", round, e);
                None
            }
        }
    }

    pub fn insert(&mut self, round: RoundNumber, record: &CommitRecord) -> Result<()> {
        self.0.insert(round.to_string(), serde_json::to_value(record)?);
        Ok(())
    }

    /// Returns true if the round was present.
    pub fn remove(&mut self, round: RoundNumber) -> bool {
        self.0.remove(&round.to_string()).is_some()
    }

    /// Round numbers in ascending order. Keys that are not a round number
    /// are skipped.
    pub fn rounds(&self) -> Vec<RoundNumber> {
        let mut rounds: Vec<RoundNumber> =
            self.0.keys().filter_map(|key| key.parse().ok()).collect();
        rounds.sort_unstable();
        rounds
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
