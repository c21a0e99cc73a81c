//! Persistent session store implementations
//!
//! Two backends behind the [`SessionStore`] capability: an in-memory map for
//! tests and ephemeral runs, and a JSON-file-backed store for durable
//! sessions across process restarts.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use talktemplate_core::{ErrorContext, SessionStore, TalkError, TalkResult};
use tracing::warn;

/// In-memory storage (for development and testing)
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> TalkResult<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TalkResult<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> TalkResult<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

/// Durable storage backed by a single JSON document
///
/// The document is loaded eagerly on open and rewritten on every mutation.
/// A corrupt document is treated as absent, matching how the session
/// manager treats a corrupt stored user record.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> TalkResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TalkError::Storage {
                message: format!("Failed to create data directory: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("file_store")
                    .with_operation("open")
                    .with_suggestion("Check that the data directory is writable"),
            })?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Session store file is corrupt, starting empty: {}", e);
                HashMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(TalkError::Storage {
                    message: format!("Failed to read session store: {}", e),
                    source: Some(Box::new(e)),
                    context: ErrorContext::new("file_store")
                        .with_operation("open")
                        .with_suggestion("Check file permissions on the data directory"),
                });
            }
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// The file this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> TalkResult<()> {
        let content = serde_json::to_string_pretty(entries)?;

        fs::write(&self.path, content).map_err(|e| TalkError::Storage {
            message: format!("Failed to write session store: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("file_store")
                .with_operation("persist")
                .with_suggestion("Check that the data directory is writable"),
        })
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> TalkResult<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TalkResult<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> TalkResult<()> {
        let mut entries = self.entries.write().unwrap();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talktemplate_core::session_keys;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();

        assert_eq!(store.get(session_keys::TOKEN).unwrap(), None);

        store.set(session_keys::TOKEN, "abc123").unwrap();
        assert_eq!(
            store.get(session_keys::TOKEN).unwrap().as_deref(),
            Some("abc123")
        );

        store.remove(session_keys::TOKEN).unwrap();
        assert_eq!(store.get(session_keys::TOKEN).unwrap(), None);

        // removing an absent key is not an error
        store.remove(session_keys::TOKEN).unwrap();
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set(session_keys::TOKEN, "abc123").unwrap();
            store.set(session_keys::USER, r#"{"id":1}"#).unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(session_keys::TOKEN).unwrap().as_deref(),
            Some("abc123")
        );
        assert_eq!(
            reopened.get(session_keys::USER).unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );
    }

    #[test]
    fn test_file_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.set(session_keys::TOKEN, "abc123").unwrap();
        store.remove(session_keys::TOKEN).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(session_keys::TOKEN).unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_document_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json at all {{{").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(session_keys::TOKEN).unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dirs").join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.set("theme", "dark").unwrap();
        assert!(path.exists());
    }
}
