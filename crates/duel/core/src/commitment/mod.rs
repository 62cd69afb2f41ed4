//! Commit/reveal moves hash.
//!
//! The commitment for a round is built lane by lane:
//!
//! ```text
//! lane(i)    = Hash(salt, moves[i]) & (MAX_U32 << 32 * i)    (0 when moves[i] == 0)
//! commitment = lane(0) | lane(1) | lane(2) | lane(3)
//! ```
//!
//! The duel contract recomputes the same value from the revealed salt and
//! moves, so every function here must stay in sync with it.

mod hasher;
mod restore;

pub use hasher::{MoveHasher, PoseidonHasher};
pub use restore::{RestoredMoves, restore_moves_from_hash};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DuelError;
use crate::moves::{Moves, move_mask};
use crate::salt::Salt;
use crate::types::{Felt, felt_low_u128, serde_hex};

/// Published commitment for a round.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovesHash(#[serde(with = "serde_hex::u128_hex")] pub u128);

impl MovesHash {
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Stored lane for slot `index`, still in place (not shifted down).
    pub fn lane(&self, index: usize) -> u128 {
        self.0 & move_mask(index)
    }
}

impl TryFrom<Felt> for MovesHash {
    type Error = DuelError;

    /// Accepts only felts below 2^128; every lane sits in the low half.
    fn try_from(value: Felt) -> Result<Self, Self::Error> {
        if value.to_bytes_be()[..16].iter().any(|&byte| byte != 0) {
            return Err(DuelError::HashOutOfRange(value.to_hex_string()));
        }
        Ok(Self(felt_low_u128(&value)))
    }
}

impl fmt::Debug for MovesHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MovesHash({:#x})", self.0)
    }
}

impl fmt::Display for MovesHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Masked hash of one move in lane `index`.
pub(crate) fn lane_hash<H: MoveHasher>(hasher: &H, salt: &Salt, index: usize, value: u8) -> u128 {
    if value == 0 {
        return 0;
    }
    hasher.hash_move_low(salt, value) & move_mask(index)
}

/// Build the commitment with the production Poseidon hasher.
///
/// Returns `None` when the salt is unset: the commitment is not ready and
/// must not be submitted. More than four moves are truncated with a warning.
pub fn make_moves_hash(salt: &Salt, moves: &[u8]) -> Option<MovesHash> {
    make_moves_hash_with(&PoseidonHasher, salt, moves)
}

/// Build the commitment with an explicit lane hasher.
pub fn make_moves_hash_with<H: MoveHasher>(
    hasher: &H,
    salt: &Salt,
    moves: &[u8],
) -> Option<MovesHash> {
    if !salt.is_set() {
        return None;
    }
    let moves = Moves::from_slice(moves);
    let value = moves
        .lanes()
        .fold(0u128, |acc, (index, value)| acc | lane_hash(hasher, salt, index, value));
    Some(MovesHash(value))
}

/// Check a revealed `(salt, moves)` pair against a published commitment.
pub fn verify_moves_hash(salt: &Salt, moves: &[u8], hash: MovesHash) -> bool {
    make_moves_hash(salt, moves) == Some(hash)
}
