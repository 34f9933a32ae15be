//! Persistent local storage: JSON documents under fixed keys.
//!
//! The web client kept its state in browser local storage as two JSON
//! documents. The Rust storefront keeps the same documents (same keys, same
//! shapes) as files in a data directory: `<dir>/<key>.json`.
//!
//! Reads are forgiving - a missing or unparseable document is logged and
//! treated as empty state. Writes replace the whole document via a
//! temp-file rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Fixed document keys.
pub mod keys {
    /// The cart document: a JSON array of cart lines.
    pub const CART: &str = "moto-shop-cart";

    /// The user document: a single JSON user object, absent when logged out.
    pub const USER: &str = "moto-shop-user";
}

/// Errors from writing or removing documents.
///
/// Reads never error - see [`LocalStore::read`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A directory of JSON documents addressed by fixed keys.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (and create if needed) the store directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The path of a document.
    #[must_use]
    pub fn document_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read and deserialize a document.
    ///
    /// Returns `None` when the document is absent, unreadable, or fails to
    /// parse; read failures are logged and the caller falls back to empty
    /// state.
    #[must_use]
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.document_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read document");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to parse document, falling back to empty state");
                None
            }
        }
    }

    /// Read a document as raw JSON text, if present.
    #[must_use]
    pub fn read_raw(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.document_path(key)).ok()
    }

    /// Serialize and write a document, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the filesystem write fails.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let path = self.document_path(key);
        let json = serde_json::to_vec_pretty(value)?;

        // Write-then-rename so readers never observe a torn document
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, "document written");
        Ok(())
    }

    /// Remove a document. Removing an absent document is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error for filesystem failures other than absence.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.document_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    /// Whether a document exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.document_path(key).exists()
    }

    /// The store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        value: u32,
    }

    fn store() -> (tempfile::TempDir, LocalStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_write_read_roundtrip() {
        let (_tmp, store) = store();
        store.write("doc", &Doc { value: 7 }).unwrap();

        assert_eq!(store.read::<Doc>("doc"), Some(Doc { value: 7 }));
        assert!(store.contains("doc"));
    }

    #[test]
    fn test_read_absent_document() {
        let (_tmp, store) = store();
        assert_eq!(store.read::<Doc>("missing"), None);
        assert!(!store.contains("missing"));
    }

    #[test]
    fn test_read_corrupt_document_falls_back_to_none() {
        let (_tmp, store) = store();
        fs::write(store.document_path("doc"), "{not json").unwrap();

        assert_eq!(store.read::<Doc>("doc"), None);
    }

    #[test]
    fn test_write_replaces_document() {
        let (_tmp, store) = store();
        store.write("doc", &Doc { value: 1 }).unwrap();
        store.write("doc", &Doc { value: 2 }).unwrap();

        assert_eq!(store.read::<Doc>("doc"), Some(Doc { value: 2 }));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_tmp, store) = store();
        store.write("doc", &Doc { value: 1 }).unwrap();

        store.remove("doc").unwrap();
        assert!(!store.contains("doc"));
        // Removing again is fine
        store.remove("doc").unwrap();
    }
}
