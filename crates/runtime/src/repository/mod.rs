//! Repository layer for commit records.
//!
//! Records are grouped in one document per duel, keyed by round number, the
//! same way a browser client keeps one cookie per duel.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::RepositoryError;
pub use file::FileCommitRepository;
pub use memory::InMemoryCommitRepo;
pub use traits::CommitRepository;
pub use types::{CommitRecord, DuelDocument};
