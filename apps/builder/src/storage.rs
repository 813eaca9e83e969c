//! Local single-device persistence: one JSON document under a fixed key,
//! written and read wholesale.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::document::ResumeDocument;
use crate::errors::StorageError;

/// Key the resume is stored under.
pub const STORAGE_KEY: &str = "resumeData";

pub trait LocalStore: Send + Sync {
    /// Overwrites the stored document.
    fn save(&self, doc: &ResumeDocument) -> Result<(), StorageError>;

    /// Reads the stored document, or [`StorageError::Missing`] if none.
    fn load(&self) -> Result<ResumeDocument, StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

// ────────────────────────────────────────────────────────────────────────────
// File-backed store
// ────────────────────────────────────────────────────────────────────────────

/// Stores the document as `<dir>/resumeData.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!(".{STORAGE_KEY}.json.tmp"))
    }
}

impl LocalStore for FileStore {
    fn save(&self, doc: &ResumeDocument) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_vec_pretty(doc)?;

        // Write beside the target and rename so a crash never leaves a
        // truncated document behind.
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, self.path())?;

        info!(path = %self.path().display(), bytes = json.len(), "saved resume");
        Ok(())
    }

    fn load(&self) -> Result<ResumeDocument, StorageError> {
        let path = self.path();
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::Missing)
            }
            Err(e) => return Err(e.into()),
        };
        let doc = serde_json::from_slice(&raw)?;
        debug!(path = %path.display(), "loaded resume");
        Ok(doc)
    }

    fn clear(&self) -> Result<(), StorageError> {
        remove_if_exists(&self.path())?;
        remove_if_exists(&self.temp_path())
    }
}

fn remove_if_exists(path: &Path) -> Result<(), StorageError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

/// Keeps serialized JSON in memory, so round-trips go through the same
/// encoding as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw JSON under the resume key, bypassing serialization.
    pub fn put_raw(&self, json: impl Into<String>) {
        self.lock().insert(STORAGE_KEY, json.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, String>> {
        // A poisoned map still holds complete strings.
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl LocalStore for MemoryStore {
    fn save(&self, doc: &ResumeDocument) -> Result<(), StorageError> {
        let json = serde_json::to_string(doc)?;
        self.lock().insert(STORAGE_KEY, json);
        Ok(())
    }

    fn load(&self) -> Result<ResumeDocument, StorageError> {
        let entries = self.lock();
        let json = entries.get(STORAGE_KEY).ok_or(StorageError::Missing)?;
        Ok(serde_json::from_str(json)?)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.lock().remove(STORAGE_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::seed_document;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        let mut doc = seed_document();
        doc.summary = "Saved summary".into();

        store.save(&doc).unwrap();
        assert!(store.path().ends_with("resumeData.json"));
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn test_file_store_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save(&seed_document()).unwrap();

        let mut second = seed_document();
        second.languages.truncate(1);
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap().languages.len(), 1);
        assert!(!dir.path().join(".resumeData.json.tmp").exists());
    }

    #[test]
    fn test_file_store_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load(), Err(StorageError::Missing)));
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_corrupt_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path(), b"{not json").unwrap();
        assert!(matches!(store.load(), Err(StorageError::Serde(_))));
    }

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemoryStore::new();
        assert!(matches!(store.load(), Err(StorageError::Missing)));
        store.save(&seed_document()).unwrap();
        assert_eq!(store.load().unwrap(), seed_document());
        store.clear().unwrap();
        assert!(matches!(store.load(), Err(StorageError::Missing)));
    }

    #[test]
    fn test_memory_store_loads_partial_document() {
        let store = MemoryStore::new();
        store.put_raw(r#"{"summary": "Only a summary"}"#);
        let doc = store.load().unwrap();
        assert_eq!(doc.summary, "Only a summary");
        assert!(doc.layout.is_permutation());
        assert!(doc.experience.is_empty());
    }
}
