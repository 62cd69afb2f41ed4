//! Pact pairing for two duelists.

use crate::types::{Felt, felt_low_u128};

/// Symmetric pair id for two addresses.
///
/// XOR of the low 128 bits of each address, so the order of arguments does
/// not matter. Returns `0` when either address is zero, which callers treat as
/// "no pair".
pub fn make_pact_pair(address_a: &Felt, address_b: &Felt) -> u128 {
    if *address_a == Felt::ZERO || *address_b == Felt::ZERO {
        return 0;
    }
    felt_low_u128(address_a) ^ felt_low_u128(address_b)
}
