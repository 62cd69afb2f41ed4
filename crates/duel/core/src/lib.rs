//! Deterministic duel primitives shared by the client store and the chain layer.
//!
//! `duel-core` holds the pieces of the commit/reveal protocol that must match
//! the on-chain duel contract bit for bit:
//! - [`moves`] packs up to four slot moves into 32-bit lanes
//! - [`commitment`] builds, verifies, and restores moves hashes
//! - [`salt`] produces the secret mixed into every lane hash
//! - [`pact`] derives the symmetric id of a pair of duelists
//! - [`cards`] decodes raw move values into typed cards
//!
//! Nothing in this crate performs I/O. Persistence and event routing live in
//! `duel-runtime`.
pub mod cards;
pub mod commitment;
pub mod error;
pub mod moves;
pub mod pact;
pub mod salt;
pub mod types;

pub use cards::{BladesCard, DuelistHand, PacesCard, TacticsCard};
pub use commitment::{
    MoveHasher, MovesHash, PoseidonHasher, RestoredMoves, make_moves_hash, make_moves_hash_with,
    restore_moves_from_hash, verify_moves_hash,
};
pub use error::DuelError;
pub use moves::{MAX_MOVES, MAX_U32, MoveSlot, Moves, move_mask};
pub use pact::make_pact_pair;
pub use salt::{FixedSalt, MAX_SAFE_INTEGER, RandomSalt, Salt, SaltSource};
pub use types::{DuelId, Felt, RoundNumber, felt_low_u128, parse_felt};
