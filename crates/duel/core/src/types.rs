//! Shared scalar types and felt helpers.

pub use starknet_crypto::Felt;

use crate::error::{DuelError, Result};

/// Duel identifier as stored on-chain (a felt252 token id).
pub type DuelId = Felt;

/// Round number inside a duel. Rounds start at 1.
pub type RoundNumber = u8;

/// Low 128 bits of a felt, equivalent to `u256.low` of the felt's integer value.
pub fn felt_low_u128(value: &Felt) -> u128 {
    let bytes = value.to_bytes_be();
    let mut low = [0u8; 16];
    low.copy_from_slice(&bytes[16..]);
    u128::from_be_bytes(low)
}

/// Parse a felt from `0x`-prefixed hex or plain decimal.
pub fn parse_felt(input: &str) -> Result<Felt> {
    let input = input.trim();
    if input.starts_with("0x") || input.starts_with("0X") {
        Felt::from_hex(input).map_err(|e| DuelError::InvalidFelt(format!("{input}: {e}")))
    } else {
        Felt::from_dec_str(input).map_err(|e| DuelError::InvalidFelt(format!("{input}: {e}")))
    }
}

/// Serde adapters that store numbers as `0x` hex strings.
///
/// Salts and hashes routinely exceed 2^53, so they are persisted the way the
/// contract's calldata prints them rather than as JSON numbers.
pub mod serde_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Felt;

    pub mod felt {
        use super::*;

        pub fn serialize<S: Serializer>(value: &Felt, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&value.to_hex_string())
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Felt, D::Error> {
            let raw = String::deserialize(deserializer)?;
            Felt::from_hex(&raw).map_err(serde::de::Error::custom)
        }
    }

    pub mod u128_hex {
        use super::*;

        pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&format!("{value:#x}"))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
            let raw = String::deserialize(deserializer)?;
            let digits = raw
                .strip_prefix("0x")
                .ok_or_else(|| serde::de::Error::custom(format!("missing 0x prefix: {raw}")))?;
            u128::from_str_radix(digits, 16).map_err(serde::de::Error::custom)
        }
    }
}
