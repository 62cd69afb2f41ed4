//! Commitment salts.
//!
//! A salt is the per-round secret that keeps a moves hash from being reversed
//! by brute force over the small move space. Zero is reserved for "no salt".

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use starknet_crypto::poseidon_hash_many;

use crate::types::{Felt, serde_hex};

/// Upper bound (exclusive) for randomly drawn salts: `2^53 - 1`.
///
/// Random salts stay inside the integer range every client runtime can
/// represent exactly.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Secret salt mixed into every lane hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salt(#[serde(with = "serde_hex::felt")] Felt);

impl Salt {
    pub const ZERO: Salt = Salt(Felt::ZERO);

    pub fn new(value: Felt) -> Self {
        Self(value)
    }

    pub fn felt(&self) -> Felt {
        self.0
    }

    /// A zero salt means the commitment is not ready.
    pub fn is_set(&self) -> bool {
        self.0 != Felt::ZERO
    }

    /// Derive a salt from a wallet signature over the commit message.
    ///
    /// Only plain `[r, s]` signatures hash to `poseidon(r, s)`. Any other
    /// shape, including three-element account signatures, yields
    /// [`Salt::ZERO`] and the caller must get its salt elsewhere.
    pub fn from_signature(signature: &[Felt]) -> Self {
        match signature {
            [_, _] => Self(poseidon_hash_many(signature)),
            _ => Self::ZERO,
        }
    }
}

impl From<u64> for Salt {
    fn from(value: u64) -> Self {
        Self(Felt::from(value))
    }
}

impl From<Felt> for Salt {
    fn from(value: Felt) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self.0.to_hex_string())
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex_string())
    }
}

/// Source of fresh salts for new commitments.
pub trait SaltSource: Send {
    /// Produce a non-zero salt.
    fn next_salt(&mut self) -> Salt;
}

/// Random salts in `1..MAX_SAFE_INTEGER`.
pub struct RandomSalt<R = StdRng> {
    rng: R,
}

impl RandomSalt<StdRng> {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence, for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSalt<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Send> SaltSource for RandomSalt<R> {
    fn next_salt(&mut self) -> Salt {
        Salt::from(self.rng.gen_range(1..MAX_SAFE_INTEGER))
    }
}

/// Always returns the same salt.
///
/// Used when the salt comes from somewhere else, for instance a signature
/// computed once per duel.
#[derive(Debug, Clone, Copy)]
pub struct FixedSalt(pub Salt);

impl SaltSource for FixedSalt {
    fn next_salt(&mut self) -> Salt {
        self.0
    }
}
