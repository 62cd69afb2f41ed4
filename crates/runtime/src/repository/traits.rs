//! Repository contract for commit records.

use duel_core::{DuelId, RoundNumber};

use super::error::Result;
use super::types::{CommitRecord, DuelDocument};

/// Storage for per-duel commit documents.
///
/// Implementations only need to load and store whole documents; the round
/// level operations are provided on top.
///
/// A missing or unreadable document must load as empty rather than fail, so
/// that the store reports "no commitment yet" to the player.
pub trait CommitRepository: Send + Sync {
    /// Load the document for a duel (empty if none was stored).
    fn load_document(&self, duel_id: &DuelId) -> Result<DuelDocument>;

    /// Replace the document for a duel. An empty document removes it.
    fn store_document(&self, duel_id: &DuelId, document: &DuelDocument) -> Result<()>;

    /// List duels that have a stored document.
    fn list_duels(&self) -> Result<Vec<DuelId>>;

    /// Load one round.
    fn load(&self, duel_id: &DuelId, round: RoundNumber) -> Result<Option<CommitRecord>> {
        Ok(self.load_document(duel_id)?.get(round))
    }

    /// Save one round, keeping the other rounds of the duel.
    fn save(&self, duel_id: &DuelId, round: RoundNumber, record: &CommitRecord) -> Result<()> {
        let mut document = self.load_document(duel_id)?;
        document.insert(round, record)?;
        self.store_document(duel_id, &document)
    }

    /// Delete one round. Returns true if it existed.
    fn delete(&self, duel_id: &DuelId, round: RoundNumber) -> Result<bool> {
        let mut document = self.load_document(duel_id)?;
        if !document.remove(round) {
            return Ok(false);
        }
        self.store_document(duel_id, &document)?;
        Ok(true)
    }

    /// Round numbers stored for a duel, ascending.
    fn list_rounds(&self, duel_id: &DuelId) -> Result<Vec<RoundNumber>> {
        Ok(self.load_document(duel_id)?.rounds())
    }
}
