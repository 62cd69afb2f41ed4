//! Move slots and lane encoding.
//!
//! A round hand has up to four moves. Each move owns one 32-bit lane of the
//! commitment, so slot `i` occupies bits `32 * i .. 32 * i + 32`.

use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Maximum number of moves committed in one round.
pub const MAX_MOVES: usize = 4;

/// Width mask of a single lane.
pub const MAX_U32: u128 = u32::MAX as u128;

/// Hand slots, in lane order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum MoveSlot {
    #[strum(to_string = "fire paces")]
    Fire = 0,
    #[strum(to_string = "dodge paces")]
    Dodge = 1,
    #[strum(to_string = "tactics")]
    Tactics = 2,
    #[strum(to_string = "blades")]
    Blades = 3,
}

impl MoveSlot {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn mask(self) -> u128 {
        move_mask(self.index())
    }
}

/// Lane mask for slot `index`.
///
/// Only indices below [`MAX_MOVES`] are meaningful; callers are expected to
/// have truncated their input through [`Moves`].
pub const fn move_mask(index: usize) -> u128 {
    MAX_U32 << (index as u32 * 32)
}

/// Ordered moves for one round, at most [`MAX_MOVES`] long.
///
/// A zero entry means "no move in this slot", so trailing zeros do not take
/// part in equality: `[3]` and `[3, 0, 0, 0]` commit the same hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Moves(ArrayVec<u8, MAX_MOVES>);

impl Moves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw slice, keeping the first [`MAX_MOVES`] entries.
    ///
    /// Extra entries are dropped with a warning.
    pub fn from_slice(moves: &[u8]) -> Self {
        if moves.len() > MAX_MOVES {
            tracing::warn!(
                "too many moves ({}), ignoring {:?}",
                moves.len(),
                &moves[MAX_MOVES..]
            );
        }
        Self(moves.iter().copied().take(MAX_MOVES).collect())
    }

    /// A single move in the first slot.
    pub fn single(value: u8) -> Self {
        Self::from_slice(&[value])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when no slot carries a move.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&value| value == 0)
    }

    pub fn get(&self, slot: MoveSlot) -> u8 {
        self.0.get(slot.index()).copied().unwrap_or(0)
    }

    /// Moves without trailing empty slots.
    fn trimmed(&self) -> &[u8] {
        let end = self.0.iter().rposition(|&value| value != 0).map_or(0, |i| i + 1);
        &self.0[..end]
    }

    /// Non-zero moves with their lane index.
    pub fn lanes(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.0
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, value)| value != 0)
    }
}

impl PartialEq for Moves {
    fn eq(&self, other: &Self) -> bool {
        self.trimmed() == other.trimmed()
    }
}

impl Eq for Moves {}

impl Hash for Moves {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.trimmed().hash(state);
    }
}

impl From<&[u8]> for Moves {
    fn from(moves: &[u8]) -> Self {
        Self::from_slice(moves)
    }
}
