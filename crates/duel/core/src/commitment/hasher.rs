//! Lane hash primitive.

use starknet_crypto::poseidon_hash_many;

use crate::salt::Salt;
use crate::types::{Felt, felt_low_u128};

/// One-way hash of `(salt, move)` used for each commitment lane.
///
/// Implementations must be deterministic. Only the low 128 bits of the output
/// ever reach a commitment, since every lane mask lives below bit 128.
pub trait MoveHasher {
    fn hash_move(&self, salt: &Salt, value: u8) -> Felt;

    /// Low 128 bits of [`MoveHasher::hash_move`].
    fn hash_move_low(&self, salt: &Salt, value: u8) -> u128 {
        felt_low_u128(&self.hash_move(salt, value))
    }
}

/// Starknet Poseidon over `[salt, move]`, identical to `poseidon_hash_span`
/// in the duel contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseidonHasher;

impl MoveHasher for PoseidonHasher {
    fn hash_move(&self, salt: &Salt, value: u8) -> Felt {
        poseidon_hash_many(&[salt.felt(), Felt::from(value)])
    }
}

impl<H: MoveHasher + ?Sized> MoveHasher for &H {
    fn hash_move(&self, salt: &Salt, value: u8) -> Felt {
        (**self).hash_move(salt, value)
    }
}
