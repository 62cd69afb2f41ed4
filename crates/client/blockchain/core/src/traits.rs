//! Duel contract trait and its errors.

use async_trait::async_trait;

use duel_core::{DuelId, Felt, Moves, MovesHash, Salt};

use crate::types::{OnChainRound, RoundState, TransactionId};

/// Duel contract errors.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Duel not found: {0}")]
    DuelNotFound(String),

    #[error("Address {0} is not a duelist of this duel")]
    NotADuelist(String),

    #[error("Round is in {actual} phase, expected {expected}")]
    WrongState {
        expected: RoundState,
        actual: RoundState,
    },

    #[error("Moves already committed")]
    AlreadyCommitted,

    #[error("Moves already revealed")]
    AlreadyRevealed,

    #[error("Revealed moves do not match the commitment")]
    HashMismatch,

    #[error("Duel already exists: {0}")]
    DuelExists(String),

    #[error("Backend-specific error: {0}")]
    BackendError(String),
}

/// Duel contract entry points used by the client.
#[async_trait]
pub trait DuelContract: Send + Sync {
    /// Publish a moves hash for the current round.
    async fn commit_moves(
        &self,
        duelist: &Felt,
        duel_id: &DuelId,
        hash: MovesHash,
    ) -> Result<TransactionId, ContractError>;

    /// Reveal salt and moves; the contract recomputes and checks the hash.
    async fn reveal_moves(
        &self,
        duelist: &Felt,
        duel_id: &DuelId,
        salt: Salt,
        moves: &Moves,
    ) -> Result<TransactionId, ContractError>;

    /// Current round of a duel.
    async fn get_round(&self, duel_id: &DuelId) -> Result<OnChainRound, ContractError>;

    /// Duel currently open between two addresses, in either order.
    async fn get_pact(&self, address_a: &Felt, address_b: &Felt)
    -> Result<Option<DuelId>, ContractError>;

    /// Whether the duelist's commitment is already on-chain.
    async fn has_committed(&self, duelist: &Felt, duel_id: &DuelId) -> Result<bool, ContractError> {
        let round = self.get_round(duel_id).await?;
        Ok(round.commits.contains_key(duelist))
    }
}
