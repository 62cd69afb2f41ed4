//! Error types raised by duel primitives.

use thiserror::Error;

use crate::moves::MoveSlot;

/// Errors surfaced while decoding or validating duel inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DuelError {
    #[error("invalid felt value: {0}")]
    InvalidFelt(String),

    #[error("moves hash {0} does not fit in 128 bits")]
    HashOutOfRange(String),

    #[error("value {value} is not a valid {slot} card")]
    InvalidCard { slot: MoveSlot, value: u8 },
}

pub type Result<T> = std::result::Result<T, DuelError>;
