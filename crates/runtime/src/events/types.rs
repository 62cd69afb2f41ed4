//! Event types for different topics.

use duel_core::{DuelId, Moves, MovesHash, RoundNumber};

/// Events about commitments being created or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitEvent {
    /// A commitment was persisted and is ready to be submitted on-chain.
    Committed {
        duel_id: DuelId,
        round: RoundNumber,
        hash: MovesHash,
        /// True when this replaced an earlier selection for the same round.
        rerolled: bool,
    },

    /// A round's commitment was discarded (round restart).
    Cleared { duel_id: DuelId, round: RoundNumber },
}

/// Events about reveals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// The reveal for a round was confirmed and the record marked.
    Revealed {
        duel_id: DuelId,
        round: RoundNumber,
        moves: Moves,
    },
}

/// Store lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Started,
    ShuttingDown,
}
