use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::models::resume::ResumeData;
use crate::persistence::store::{DraftStore, StorageError};
use crate::transfer::codec::{decode, ImportMode};

pub const DEFAULT_DRAFT_KEY: &str = "ai-resume-builder-draft";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Written,
    /// The stored bytes already match; nothing was written.
    Unchanged,
    /// The write failed and was logged. The draft is only in memory.
    Failed,
    /// The slot was cleared after this save was issued; nothing was written.
    Superseded,
}

/// Reads and writes the draft in a single named slot.
///
/// Holds no copy of the draft: `save` never changes what the caller reads,
/// and every `load` goes to the store.
///
/// Saves and clears are serialized by one lock shared between clones. Every
/// clear bumps a write epoch under that lock, so a save issued before a clear
/// can never land after it.
#[derive(Clone)]
pub struct DraftRepository {
    store: Arc<dyn DraftStore>,
    key: String,
    writes: Arc<Mutex<()>>,
    epoch: Arc<AtomicU64>,
}

impl DraftRepository {
    pub fn new(store: Arc<dyn DraftStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            writes: Arc::new(Mutex::new(())),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored draft, or `None` when the slot is empty, unreadable or
    /// holds something that is not a draft.
    pub fn load(&self) -> Option<ResumeData> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!("Error loading draft '{}': {e}", self.key);
                return None;
            }
        };

        match decode(&raw, ImportMode::Lenient) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Ignoring unreadable draft in '{}': {e}", self.key);
                None
            }
        }
    }

    /// The current write epoch. Pass it to [`DraftRepository::save_from`]
    /// when the save itself will happen later.
    pub fn write_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    pub fn save(&self, data: &ResumeData) -> SaveOutcome {
        let _writes = self.writes();
        self.write(data)
    }

    /// Saves only if no clear has happened since `epoch` was read.
    pub fn save_from(&self, epoch: u64, data: &ResumeData) -> SaveOutcome {
        let _writes = self.writes();
        if self.write_epoch() != epoch {
            info!("Dropping save for '{}' issued before it was cleared", self.key);
            return SaveOutcome::Superseded;
        }
        self.write(data)
    }

    fn write(&self, data: &ResumeData) -> SaveOutcome {
        let serialized = match serde_json::to_string(data) {
            Ok(s) => s,
            Err(e) => {
                error!("Error serializing draft: {e}");
                return SaveOutcome::Failed;
            }
        };

        match self.store.get(&self.key) {
            Ok(Some(current)) if current == serialized => return SaveOutcome::Unchanged,
            Ok(_) => {}
            // A failed read should not block the write attempt.
            Err(e) => warn!("Could not read draft '{}' before saving: {e}", self.key),
        }

        match self.store.set(&self.key, &serialized) {
            Ok(()) => {
                info!("Saved draft '{}' ({} bytes)", self.key, serialized.len());
                SaveOutcome::Written
            }
            Err(e) => {
                error!("Error saving draft '{}': {e}", self.key);
                SaveOutcome::Failed
            }
        }
    }

    /// Removes the stored draft. Saves issued before this call are dropped,
    /// even when the removal itself fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        let _writes = self.writes();
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.store.remove(&self.key)?;
        info!("Cleared draft '{}'", self.key);
        Ok(())
    }

    fn writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::MemoryStore;

    struct BrokenStore;

    impl DraftStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
    }

    fn sample() -> ResumeData {
        let mut data = ResumeData::default();
        data.personal_info.name = "Ada".to_string();
        data.skills = vec!["Rust".to_string()];
        data
    }

    #[test]
    fn test_empty_slot_loads_none() {
        let repo = DraftRepository::new(Arc::new(MemoryStore::new()), DEFAULT_DRAFT_KEY);
        assert_eq!(repo.load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let repo = DraftRepository::new(Arc::new(MemoryStore::new()), DEFAULT_DRAFT_KEY);
        assert_eq!(repo.save(&sample()), SaveOutcome::Written);
        assert_eq!(repo.load(), Some(sample()));
    }

    #[test]
    fn test_identical_save_is_skipped() {
        let repo = DraftRepository::new(Arc::new(MemoryStore::new()), DEFAULT_DRAFT_KEY);
        assert_eq!(repo.save(&sample()), SaveOutcome::Written);
        assert_eq!(repo.save(&sample()), SaveOutcome::Unchanged);

        let mut changed = sample();
        changed.summary = "New".to_string();
        assert_eq!(repo.save(&changed), SaveOutcome::Written);
    }

    #[test]
    fn test_clear_removes_slot() {
        let repo = DraftRepository::new(Arc::new(MemoryStore::new()), DEFAULT_DRAFT_KEY);
        repo.save(&sample());
        repo.clear().unwrap();
        assert_eq!(repo.load(), None);
    }

    #[test]
    fn test_save_issued_before_clear_is_dropped() {
        let repo = DraftRepository::new(Arc::new(MemoryStore::new()), DEFAULT_DRAFT_KEY);
        let epoch = repo.write_epoch();
        let other = repo.clone();
        other.clear().unwrap();

        assert_eq!(repo.save_from(epoch, &sample()), SaveOutcome::Superseded);
        assert_eq!(repo.load(), None);

        assert_eq!(
            repo.save_from(repo.write_epoch(), &sample()),
            SaveOutcome::Written
        );
        assert_eq!(repo.load(), Some(sample()));
    }

    #[test]
    fn test_garbage_in_slot_loads_none() {
        let store = Arc::new(MemoryStore::new());
        store.set(DEFAULT_DRAFT_KEY, "{not json").unwrap();
        let repo = DraftRepository::new(store, DEFAULT_DRAFT_KEY);
        assert_eq!(repo.load(), None);
    }

    #[test]
    fn test_storage_failures_are_absorbed() {
        let repo = DraftRepository::new(Arc::new(BrokenStore), DEFAULT_DRAFT_KEY);
        assert_eq!(repo.load(), None);
        assert_eq!(repo.save(&sample()), SaveOutcome::Failed);
        assert!(repo.clear().is_err());
    }
}
