//! Recover committed moves from a hash, given the salt and candidate decks.
//!
//! A player who lost their local record but can re-derive the salt (from a
//! signature) tries every card of each deck against the matching lane.

use super::{MovesHash, PoseidonHasher, lane_hash};
use crate::moves::{MAX_MOVES, Moves};
use crate::salt::Salt;

/// Outcome of [`restore_moves_from_hash`].
///
/// Restoration stops at the first slot no candidate matches, so `moves` holds
/// the slots recovered up to that point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredMoves {
    moves: Moves,
    complete: bool,
}

impl RestoredMoves {
    pub fn moves(&self) -> &Moves {
        &self.moves
    }

    /// True when every deck matched its lane.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The full hand, or `None` if restoration stopped early.
    pub fn into_complete(self) -> Option<Moves> {
        self.complete.then_some(self.moves)
    }
}

/// Restore the moves behind `hash`.
///
/// `decks[i]` lists the candidate moves for slot `i`. An empty deck, or an
/// empty lane in the hash, restores as `0`. An unset salt restores nothing.
pub fn restore_moves_from_hash(salt: &Salt, hash: MovesHash, decks: &[Vec<u8>]) -> RestoredMoves {
    if !salt.is_set() {
        return RestoredMoves::default();
    }
    if decks.len() > MAX_MOVES {
        tracing::warn!("too many decks ({}), only {} slots exist", decks.len(), MAX_MOVES);
    }

    let hasher = PoseidonHasher;
    let mut restored = Vec::with_capacity(MAX_MOVES);

    for (index, deck) in decks.iter().take(MAX_MOVES).enumerate() {
        let stored = hash.lane(index);
        if deck.is_empty() || stored == 0 {
            restored.push(0);
            continue;
        }
        match deck
            .iter()
            .copied()
            .find(|&candidate| lane_hash(&hasher, salt, index, candidate) == stored)
        {
            Some(found) => restored.push(found),
            None => {
                tracing::warn!("no candidate matches lane {} of {}", index, hash);
                return RestoredMoves {
                    moves: Moves::from_slice(&restored),
                    complete: false,
                };
            }
        }
    }

    RestoredMoves {
        moves: Moves::from_slice(&restored),
        complete: true,
    }
}
