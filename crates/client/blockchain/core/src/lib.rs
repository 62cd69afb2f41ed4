//! Chain abstraction for the duel contract.
//!
//! The duel contract is the final consumer of a commitment: it stores the
//! published moves hash, and on reveal recomputes the hash from the revealed
//! salt and moves with the same algorithm as `duel-core`.
//!
//! # Architecture
//!
//! ```text
//! DuelContract (async trait)
//!   ├── commit_moves / reveal_moves   (transactions)
//!   └── get_round / get_pact          (queries)
//!
//! InMemoryDuelContract                (local chain, verifies reveals)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_core::DuelContract;
//!
//! async fn play(contract: &dyn DuelContract) {
//!     contract.commit_moves(&me, &duel_id, hash).await?;
//!     contract.reveal_moves(&me, &duel_id, salt, &moves).await?;
//! }
//! ```

pub mod memory;
pub mod traits;
pub mod types;

pub use memory::InMemoryDuelContract;
pub use traits::{ContractError, DuelContract};
pub use types::{OnChainRound, RoundState, TransactionId};
