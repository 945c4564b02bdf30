//! The complaint ledger: a JSON file mapping complaint ID to record.
//!
//! File format: one JSON object keyed by complaint ID, values as
//! `ComplaintRecord`, pretty-printed. Records are created on submission
//! and mutated by staff updates; nothing is ever deleted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use triage_core::{ComplaintId, ComplaintRecord};

use crate::error::{StoreError, StoreResult};

/// File-backed complaint ledger.
///
/// Every operation reads the whole file; mutations rewrite it. The
/// internal lock serializes access within this process only.
#[derive(Debug)]
pub struct ComplaintLedger {
    path: PathBuf,
    lock: RwLock<()>,
}

impl ComplaintLedger {
    /// Creates a ledger handle for the given file. The file is created
    /// lazily on first write; a missing file reads as an empty ledger.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts a new record under a freshly generated ID and returns it.
    ///
    /// IDs are 8-character random tokens; on the (birthday-bound) chance
    /// of a collision with an existing key the ID is re-rolled.
    pub async fn create(&self, record: ComplaintRecord) -> StoreResult<ComplaintId> {
        let _guard = self.lock.write().await;
        let mut complaints = self.read_map().await?;

        let mut id = ComplaintId::generate();
        while complaints.contains_key(&id) {
            id = ComplaintId::generate();
        }

        complaints.insert(id.clone(), record);
        self.write_map(&complaints).await?;

        tracing::info!(complaint_id = %id, "created complaint record");
        Ok(id)
    }

    /// Looks up a single record.
    pub async fn get(&self, id: &ComplaintId) -> StoreResult<Option<ComplaintRecord>> {
        let _guard = self.lock.read().await;
        let complaints = self.read_map().await?;
        Ok(complaints.get(id).cloned())
    }

    /// Updates the status and assigned departments of an existing record.
    ///
    /// An unknown ID returns `ComplaintNotFound` and leaves the file
    /// untouched.
    pub async fn update(
        &self,
        id: &ComplaintId,
        status: String,
        departments: Vec<String>,
    ) -> StoreResult<()> {
        let _guard = self.lock.write().await;
        let mut complaints = self.read_map().await?;

        let record = complaints
            .get_mut(id)
            .ok_or_else(|| StoreError::ComplaintNotFound(id.clone()))?;
        record.status = status;
        record.assigned_departments = departments;

        self.write_map(&complaints).await?;
        tracing::info!(complaint_id = %id, "updated complaint record");
        Ok(())
    }

    /// Returns the entire ledger, ordered by ID.
    pub async fn list_all(&self) -> StoreResult<BTreeMap<ComplaintId, ComplaintRecord>> {
        let _guard = self.lock.read().await;
        self.read_map().await
    }

    async fn read_map(&self) -> StoreResult<BTreeMap<ComplaintId, ComplaintRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupted {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_map(
        &self,
        complaints: &BTreeMap<ComplaintId, ComplaintRecord>,
    ) -> StoreResult<()> {
        let json =
            serde_json::to_vec_pretty(complaints).map_err(StoreError::Serialization)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::Prediction;

    fn record(text: &str) -> ComplaintRecord {
        ComplaintRecord::new(
            "1234567890".to_string(),
            text.to_string(),
            vec![Prediction {
                department: "Punctuality".to_string(),
                score: 0.9,
            }],
        )
    }

    fn ledger_in(dir: &tempfile::TempDir) -> ComplaintLedger {
        ComplaintLedger::new(dir.path().join("complaints.json"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        assert!(ledger.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_then_get_returns_submitted_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        let text = "Train delayed by 4 hours";
        let id = ledger.create(record(text)).await.unwrap();
        assert_eq!(id.as_str().len(), 8);

        let fetched = ledger.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched.complaint, text);
        assert_eq!(fetched.status, "Pending");
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        let found = ledger.get(&ComplaintId::from("deadbeef")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn update_changes_status_and_departments() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        let id = ledger.create(record("no water")).await.unwrap();
        ledger
            .update(
                &id,
                "In Progress".to_string(),
                vec!["Cleanliness".to_string(), "Catering".to_string()],
            )
            .await
            .unwrap();

        let fetched = ledger.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched.status, "In Progress");
        assert_eq!(fetched.assigned_departments, vec!["Cleanliness", "Catering"]);
    }

    #[tokio::test]
    async fn update_unknown_id_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        ledger.create(record("late train")).await.unwrap();

        let before = std::fs::read(ledger.path()).unwrap();
        let err = ledger
            .update(
                &ComplaintId::from("00000000"),
                "Resolved".to_string(),
                vec![],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ComplaintNotFound(_)));

        let after = std::fs::read(ledger.path()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn corrupted_file_is_an_error_not_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        std::fs::write(ledger.path(), b"{ not json").unwrap();

        let err = ledger.list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));

        // And a create must not clobber the unreadable file.
        let err = ledger.create(record("x")).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));
        assert_eq!(std::fs::read(ledger.path()).unwrap(), b"{ not json");
    }

    #[tokio::test]
    async fn list_all_returns_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        let a = ledger.create(record("first")).await.unwrap();
        let b = ledger.create(record("second")).await.unwrap();

        let all = ledger.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains_key(&a));
        assert!(all.contains_key(&b));
    }
}
