//! File-backed registration journal: the durable fallback store.
//!
//! A single pretty-printed JSON array at `<data_dir>/registrations.json`.
//! Every mutation is a whole-file read-modify-write serialized through one
//! mutex, so concurrent writers cannot interleave and lose entries. Entries
//! carry a `synced` flag: `true` once the row is known to exist in the
//! database, `false` while the background reconciler still owes a retry.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use karvan_core::types::Timestamp;

use crate::models::registration::Registration;

/// File name of the journal inside the data directory.
pub const JOURNAL_FILE: &str = "registrations.json";

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("Journal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Journal content is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// One journaled registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(flatten)]
    pub registration: Registration,
    /// Whether the database is known to hold this registration.
    pub synced: bool,
}

/// Single-writer handle to the journal file.
///
/// All access goes through one instance (shared via `Arc`); the internal
/// mutex serializes the read-modify-write cycle.
#[derive(Debug)]
pub struct RegistrationJournal {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RegistrationJournal {
    /// Open (or create) the journal under `data_dir`.
    ///
    /// Creates the directory on first run and initializes the file to `[]`.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, JournalError> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir).await?;

        let path = data_dir.join(JOURNAL_FILE);
        if tokio::fs::try_exists(&path).await? {
            // Fail fast on a corrupt journal rather than clobbering it later.
            let raw = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str::<Vec<JournalEntry>>(&raw)?;
        } else {
            tokio::fs::write(&path, "[]").await?;
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, oldest first.
    pub async fn entries(&self) -> Result<Vec<JournalEntry>, JournalError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    /// Append a registration.
    pub async fn append(
        &self,
        registration: &Registration,
        synced: bool,
    ) -> Result<(), JournalError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.push(JournalEntry {
            registration: registration.clone(),
            synced,
        });
        self.write_all(&entries).await
    }

    /// Update the status of the entry matching `reference`.
    ///
    /// Returns `false` when no entry matches, which callers on the
    /// best-effort mirror path silently accept.
    pub async fn update_status(
        &self,
        reference: &str,
        status: &str,
        updated_at: Timestamp,
    ) -> Result<bool, JournalError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;

        let Some(entry) = entries
            .iter_mut()
            .find(|e| e.registration.id == reference)
        else {
            return Ok(false);
        };

        entry.registration.status = status.to_string();
        entry.registration.updated_at = Some(updated_at);

        self.write_all(&entries).await?;
        Ok(true)
    }

    /// Registrations still awaiting reconciliation into the database.
    pub async fn unsynced(&self) -> Result<Vec<Registration>, JournalError> {
        let _guard = self.lock.lock().await;
        let entries = self.read_all().await?;
        Ok(entries
            .into_iter()
            .filter(|e| !e.synced)
            .map(|e| e.registration)
            .collect())
    }

    /// Number of registrations still awaiting reconciliation.
    pub async fn unsynced_count(&self) -> Result<usize, JournalError> {
        Ok(self.unsynced().await?.len())
    }

    /// Mark the entry matching `reference` as present in the database.
    pub async fn mark_synced(&self, reference: &str) -> Result<bool, JournalError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;

        let Some(entry) = entries
            .iter_mut()
            .find(|e| e.registration.id == reference)
        else {
            return Ok(false);
        };

        entry.synced = true;
        self.write_all(&entries).await?;
        Ok(true)
    }

    async fn read_all(&self) -> Result<Vec<JournalEntry>, JournalError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write_all(&self, entries: &[JournalEntry]) -> Result<(), JournalError> {
        let raw = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample(reference: &str) -> Registration {
        Registration {
            id: reference.to_string(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: "1".to_string(),
            tour_title: "Samarkand Tour".to_string(),
            people: 2,
            unit_price: 50.0,
            total_price: 100.0,
            status: "undone".to_string(),
            message: "Booking request".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn open_initializes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let journal = RegistrationJournal::open(dir.path().join("data"))
            .await
            .unwrap();

        assert!(journal.path().exists());
        assert!(journal.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_and_reopen_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        {
            let journal = RegistrationJournal::open(dir.path()).await.unwrap();
            journal.append(&sample("r1"), false).await.unwrap();
            journal.append(&sample("r2"), true).await.unwrap();
        }

        let journal = RegistrationJournal::open(dir.path()).await.unwrap();
        let entries = journal.entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].registration.id, "r1");
        assert!(!entries[0].synced);
        assert!(entries[1].synced);
    }

    #[tokio::test]
    async fn update_status_touches_only_the_matching_entry() {
        let dir = tempfile::tempdir().unwrap();
        let journal = RegistrationJournal::open(dir.path()).await.unwrap();
        journal.append(&sample("r1"), true).await.unwrap();
        journal.append(&sample("r2"), true).await.unwrap();

        let now = chrono::Utc::now();
        assert!(journal.update_status("r2", "done", now).await.unwrap());

        let entries = journal.entries().await.unwrap();
        assert_eq!(entries[0].registration.status, "undone");
        assert_eq!(entries[1].registration.status, "done");
        assert_eq!(entries[1].registration.updated_at, Some(now));
    }

    #[tokio::test]
    async fn update_status_on_unknown_reference_reports_miss() {
        let dir = tempfile::tempdir().unwrap();
        let journal = RegistrationJournal::open(dir.path()).await.unwrap();
        journal.append(&sample("r1"), true).await.unwrap();

        let matched = journal
            .update_status("missing", "done", chrono::Utc::now())
            .await
            .unwrap();
        assert!(!matched);
        assert_eq!(journal.entries().await.unwrap()[0].registration.status, "undone");
    }

    #[tokio::test]
    async fn unsynced_and_mark_synced() {
        let dir = tempfile::tempdir().unwrap();
        let journal = RegistrationJournal::open(dir.path()).await.unwrap();
        journal.append(&sample("r1"), false).await.unwrap();
        journal.append(&sample("r2"), true).await.unwrap();
        journal.append(&sample("r3"), false).await.unwrap();

        let pending = journal.unsynced().await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(journal.unsynced_count().await.unwrap(), 2);

        assert!(journal.mark_synced("r1").await.unwrap());
        let pending = journal.unsynced().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "r3");
    }

    #[tokio::test]
    async fn open_rejects_corrupt_journal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(JOURNAL_FILE);
        tokio::fs::write(&path, "not json").await.unwrap();

        let result = RegistrationJournal::open(dir.path()).await;
        assert_matches!(result, Err(JournalError::Format(_)));
    }

    #[tokio::test]
    async fn concurrent_appends_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let journal =
            std::sync::Arc::new(RegistrationJournal::open(dir.path()).await.unwrap());

        let mut handles = Vec::new();
        for i in 0..8 {
            let journal = std::sync::Arc::clone(&journal);
            handles.push(tokio::spawn(async move {
                journal.append(&sample(&format!("r{i}")), false).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(journal.entries().await.unwrap().len(), 8);
    }
}
