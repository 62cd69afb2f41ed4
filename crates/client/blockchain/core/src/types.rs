//! Common types for duel contract interactions.

use std::collections::BTreeMap;
use std::fmt;

use duel_core::{DuelId, Felt, Moves, MovesHash};

/// Generic transaction identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(pub Vec<u8>);

impl TransactionId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

/// Phase of the current round on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for both duelists to commit
    Commit,
    /// Both committed, waiting for reveals
    Reveal,
    /// Both revealed
    Finished,
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoundState::Commit => "commit",
            RoundState::Reveal => "reveal",
            RoundState::Finished => "finished",
        };
        write!(f, "{}", label)
    }
}

/// On-chain view of a duel's current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainRound {
    pub duel_id: DuelId,
    pub duelist_a: Felt,
    pub duelist_b: Felt,
    pub state: RoundState,
    /// Published commitments by duelist address
    pub commits: BTreeMap<Felt, MovesHash>,
    /// Verified reveals by duelist address
    pub reveals: BTreeMap<Felt, Moves>,
}

impl OnChainRound {
    pub fn new(duel_id: DuelId, duelist_a: Felt, duelist_b: Felt) -> Self {
        Self {
            duel_id,
            duelist_a,
            duelist_b,
            state: RoundState::Commit,
            commits: BTreeMap::new(),
            reveals: BTreeMap::new(),
        }
    }

    pub fn is_duelist(&self, address: &Felt) -> bool {
        *address == self.duelist_a || *address == self.duelist_b
    }
}
