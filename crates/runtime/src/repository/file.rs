//! File-based CommitRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use duel_core::{DuelId, Felt};

use super::error::{RepositoryError, Result};
use super::traits::CommitRepository;
use super::types::DuelDocument;

const FILE_PREFIX: &str = "commits_";
const FILE_SUFFIX: &str = ".json";
const CORRUPT_EXTENSION: &str = "json.corrupt";

/// File-based implementation of CommitRepository.
///
/// Each duel is stored as `commits_{duel_id_hex}.json`, a JSON object mapping
/// round numbers to records. Writes go to a temp file first and are renamed
/// into place. A file that no longer parses is renamed to
/// `commits_{duel_id_hex}.json.corrupt` and the duel reads as empty.
pub struct FileCommitRepository {
    base_dir: PathBuf,
}

impl FileCommitRepository {
    /// Create a new file-based commit repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::io(&base_dir))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a duel document.
    fn document_path(&self, duel_id: &DuelId) -> PathBuf {
        self.base_dir
            .join(format!("{}{}{}", FILE_PREFIX, duel_id.to_hex_string(), FILE_SUFFIX))
    }
}

impl CommitRepository for FileCommitRepository {
    fn load_document(&self, duel_id: &DuelId) -> Result<DuelDocument> {
        let path = self.document_path(duel_id);

        if !path.exists() {
            return Ok(DuelDocument::new());
        }

        let json = fs::read_to_string(&path).map_err(RepositoryError::io(&path))?;
        match serde_json::from_str(&json) {
            Ok(document) => Ok(document),
            Err(e) => {
                // Move it aside so the next save cannot overwrite the salts in it
                let corrupt = path.with_extension(CORRUPT_EXTENSION);
                fs::rename(&path, &corrupt).map_err(RepositoryError::io(&corrupt))?;
                tracing::warn!(
                    "Unreadable commit file {} moved to {}: {}",
                    path.display(),
                    corrupt.display(),
                    e
                );
                Ok(DuelDocument::new())
            }
        }
    }

    fn store_document(&self, duel_id: &DuelId, document: &DuelDocument) -> Result<()> {
        let path = self.document_path(duel_id);

        if document.is_empty() {
            if path.exists() {
                fs::remove_file(&path).map_err(RepositoryError::io(&path))?;
                tracing::debug!("Deleted commit file {}", path.display());
            }
            return Ok(());
        }

        let temp_path = path.with_extension("json.tmp");

        // Write to temp file
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&temp_path, json).map_err(RepositoryError::io(&temp_path))?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::io(&path))?;

        tracing::debug!("Saved commits to {}", path.display());

        Ok(())
    }

    fn list_duels(&self) -> Result<Vec<DuelId>> {
        let mut duels = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::io(&self.base_dir))?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::io(&self.base_dir))?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(duel_hex) = filename
                    .strip_prefix(FILE_PREFIX)
                    .and_then(|s| s.strip_suffix(FILE_SUFFIX))
                && let Ok(duel_id) = Felt::from_hex(duel_hex)
            {
                duels.push(duel_id);
            }
        }

        duels.sort_unstable();
        Ok(duels)
    }
}

#[cfg(test)]
mod tests {
    use duel_core::{Moves, MovesHash, Salt};
    use tempfile::TempDir;

    use super::*;
    use crate::repository::CommitRecord;

    fn record(value: u8) -> CommitRecord {
        CommitRecord::new(
            Moves::single(value),
            Salt::from(u64::from(value) * 1000),
            MovesHash(u128::from(value)),
        )
    }

    #[test]
    fn test_save_and_reload_from_disk() {
        let dir = TempDir::new().unwrap();
        let duel = Felt::from(0xABCu64);
        {
            let repo = FileCommitRepository::new(dir.path()).unwrap();
            repo.save(&duel, 1, &record(3)).unwrap();
            repo.save(&duel, 2, &record(5)).unwrap();
        }

        let repo = FileCommitRepository::new(dir.path()).unwrap();
        assert_eq!(repo.load(&duel, 1).unwrap(), Some(record(3)));
        assert_eq!(repo.load(&duel, 2).unwrap(), Some(record(5)));
        assert_eq!(repo.list_duels().unwrap(), vec![duel]);
        assert!(dir.path().join("commits_0xabc.json").exists());
    }

    #[test]
    fn test_unreadable_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let repo = FileCommitRepository::new(dir.path()).unwrap();
        let duel = Felt::from(0x1u64);
        fs::write(dir.path().join("commits_0x1.json"), "{ not json").unwrap();

        assert_eq!(repo.load(&duel, 1).unwrap(), None);
        assert!(repo.list_rounds(&duel).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_file_is_kept_aside() {
        let dir = TempDir::new().unwrap();
        let repo = FileCommitRepository::new(dir.path()).unwrap();
        let duel = Felt::from(0x1u64);
        fs::write(dir.path().join("commits_0x1.json"), "{ not json").unwrap();

        repo.save(&duel, 2, &record(4)).unwrap();

        let corrupt = dir.path().join("commits_0x1.json.corrupt");
        assert_eq!(fs::read_to_string(corrupt).unwrap(), "{ not json");
        assert_eq!(repo.load(&duel, 2).unwrap(), Some(record(4)));
        assert_eq!(repo.list_duels().unwrap(), vec![duel]);
    }

    #[test]
    fn test_bad_round_key_does_not_discard_file() {
        let dir = TempDir::new().unwrap();
        let repo = FileCommitRepository::new(dir.path()).unwrap();
        let duel = Felt::from(0x7u64);
        let path = dir.path().join("commits_0x7.json");
        fs::write(
            &path,
            r#"{"1": {"moves": [3], "salt": "0xbb8", "hash": "0x3"}, "999": {}}"#,
        )
        .unwrap();

        assert_eq!(repo.load(&duel, 1).unwrap(), Some(record(3)));
        repo.save(&duel, 2, &record(5)).unwrap();

        assert_eq!(repo.load(&duel, 1).unwrap(), Some(record(3)));
        assert_eq!(repo.list_rounds(&duel).unwrap(), vec![1, 2]);
        assert!(fs::read_to_string(&path).unwrap().contains("\"999\""));
    }

    #[test]
    fn test_delete_last_round_removes_file() {
        let dir = TempDir::new().unwrap();
        let repo = FileCommitRepository::new(dir.path()).unwrap();
        let duel = Felt::from(0x42u64);
        repo.save(&duel, 1, &record(2)).unwrap();

        assert!(repo.delete(&duel, 1).unwrap());
        assert!(!dir.path().join("commits_0x42.json").exists());
        assert!(repo.list_duels().unwrap().is_empty());
    }

    #[test]
    fn test_foreign_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        let repo = FileCommitRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("commits_zz.json"), "{}").unwrap();
        assert!(repo.list_duels().unwrap().is_empty());
    }
}
