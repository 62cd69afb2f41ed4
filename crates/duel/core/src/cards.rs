//! Typed cards for each hand slot.
//!
//! Raw move values are the enum discriminants used by the duel contract.
//! Decoding goes through explicit tables instead of matching variant names at
//! runtime.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use crate::error::{DuelError, Result};
use crate::moves::{MAX_MOVES, MoveSlot, Moves};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum PacesCard {
    #[default]
    None = 0,
    Paces1 = 1,
    Paces2 = 2,
    Paces3 = 3,
    Paces4 = 4,
    Paces5 = 5,
    Paces6 = 6,
    Paces7 = 7,
    Paces8 = 8,
    Paces9 = 9,
    Paces10 = 10,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum TacticsCard {
    #[default]
    None = 0,
    Insult = 1,
    CoinToss = 2,
    Vengeful = 3,
    ThickCoat = 4,
    Reversal = 5,
    Bananas = 6,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum BladesCard {
    #[default]
    None = 0,
    Seppuku = 1,
    PocketPistol = 2,
    Behead = 3,
    Grapple = 4,
}

impl PacesCard {
    pub fn decode(slot: MoveSlot, value: u8) -> Result<Self> {
        Self::from_repr(value).ok_or(DuelError::InvalidCard { slot, value })
    }
}

impl TacticsCard {
    pub fn decode(value: u8) -> Result<Self> {
        Self::from_repr(value).ok_or(DuelError::InvalidCard {
            slot: MoveSlot::Tactics,
            value,
        })
    }
}

impl BladesCard {
    pub fn decode(value: u8) -> Result<Self> {
        Self::from_repr(value).ok_or(DuelError::InvalidCard {
            slot: MoveSlot::Blades,
            value,
        })
    }
}

/// A decoded round hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelistHand {
    pub card_fire: PacesCard,
    pub card_dodge: PacesCard,
    pub card_tactics: TacticsCard,
    pub card_blades: BladesCard,
}

impl DuelistHand {
    /// Decode committed moves into cards. Missing trailing slots decode as `None`.
    pub fn from_moves(moves: &Moves) -> Result<Self> {
        Ok(Self {
            card_fire: PacesCard::decode(MoveSlot::Fire, moves.get(MoveSlot::Fire))?,
            card_dodge: PacesCard::decode(MoveSlot::Dodge, moves.get(MoveSlot::Dodge))?,
            card_tactics: TacticsCard::decode(moves.get(MoveSlot::Tactics))?,
            card_blades: BladesCard::decode(moves.get(MoveSlot::Blades))?,
        })
    }

    /// Encode back into the four-slot move list.
    pub fn to_moves(&self) -> Moves {
        Moves::from_slice(&[
            self.card_fire as u8,
            self.card_dodge as u8,
            self.card_tactics as u8,
            self.card_blades as u8,
        ])
    }

    /// Candidate decks per slot, for restoring moves from a hash.
    pub fn full_decks() -> Vec<Vec<u8>> {
        use strum::IntoEnumIterator;

        let paces: Vec<u8> = PacesCard::iter().skip(1).map(|card| card as u8).collect();
        let decks = vec![
            paces.clone(),
            paces,
            TacticsCard::iter().skip(1).map(|card| card as u8).collect(),
            BladesCard::iter().skip(1).map(|card| card as u8).collect(),
        ];
        debug_assert_eq!(decks.len(), MAX_MOVES);
        decks
    }
}

impl TryFrom<&Moves> for DuelistHand {
    type Error = DuelError;

    fn try_from(moves: &Moves) -> Result<Self> {
        Self::from_moves(moves)
    }
}
