//! In-memory CommitRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use duel_core::DuelId;

use super::error::{RepositoryError, Result};
use super::traits::CommitRepository;
use super::types::DuelDocument;

/// In-memory implementation of CommitRepository.
pub struct InMemoryCommitRepo {
    documents: RwLock<HashMap<DuelId, DuelDocument>>,
}

impl InMemoryCommitRepo {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCommitRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitRepository for InMemoryCommitRepo {
    fn load_document(&self, duel_id: &DuelId) -> Result<DuelDocument> {
        let documents = self
            .documents
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(documents.get(duel_id).cloned().unwrap_or_default())
    }

    fn store_document(&self, duel_id: &DuelId, document: &DuelDocument) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if document.is_empty() {
            documents.remove(duel_id);
        } else {
            documents.insert(*duel_id, document.clone());
        }
        Ok(())
    }

    fn list_duels(&self) -> Result<Vec<DuelId>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut duels: Vec<DuelId> = documents.keys().copied().collect();
        duels.sort_unstable();
        Ok(duels)
    }
}

#[cfg(test)]
mod tests {
    use duel_core::{Felt, Moves, MovesHash, Salt};

    use super::*;
    use crate::repository::CommitRecord;

    #[test]
    fn test_rounds_share_a_document() {
        let repo = InMemoryCommitRepo::new();
        let duel = Felt::from(0xABCu64);
        let first = CommitRecord::new(Moves::single(1), Salt::from(1u64), MovesHash(1));
        let second = CommitRecord::new(Moves::single(2), Salt::from(2u64), MovesHash(2));

        repo.save(&duel, 1, &first).unwrap();
        repo.save(&duel, 2, &second).unwrap();

        assert_eq!(repo.load(&duel, 1).unwrap(), Some(first));
        assert_eq!(repo.load(&duel, 2).unwrap(), Some(second));
        assert_eq!(repo.list_rounds(&duel).unwrap(), vec![1, 2]);
        assert_eq!(repo.list_duels().unwrap(), vec![duel]);
    }

    #[test]
    fn test_deleting_last_round_drops_duel() {
        let repo = InMemoryCommitRepo::new();
        let duel = Felt::from(7u64);
        let record = CommitRecord::new(Moves::single(3), Salt::from(3u64), MovesHash(3));
        repo.save(&duel, 1, &record).unwrap();

        assert!(repo.delete(&duel, 1).unwrap());
        assert!(!repo.delete(&duel, 1).unwrap());
        assert!(repo.list_duels().unwrap().is_empty());
        assert_eq!(repo.load(&duel, 1).unwrap(), None);
    }
}
