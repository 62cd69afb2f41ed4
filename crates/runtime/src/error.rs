//! Error types surfaced by the commit store API.

use thiserror::Error;

use duel_core::RoundNumber;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("round {round} of duel {duel_id} was already revealed")]
    AlreadyRevealed { duel_id: String, round: RoundNumber },

    #[error("round {round} of duel {duel_id} is already committed on-chain")]
    AlreadySubmitted { duel_id: String, round: RoundNumber },

    #[error("salt source lock was poisoned")]
    SaltSourcePoisoned,
}
