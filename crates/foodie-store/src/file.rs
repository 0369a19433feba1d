//! # File Store
//!
//! One JSON file per storage key inside a data directory.
//!
//! ## Write Path
//! ```text
//! set("foodie-cart", value)
//!      │
//!      ├── key valid?  no ──► StorageError::InvalidKey
//!      ▼
//!  write  <dir>/foodie-cart.json.tmp
//!      ▼
//!  rename <dir>/foodie-cart.json.tmp ──► <dir>/foodie-cart.json
//! ```
//!
//! The rename replaces the old file in one step, so a crash mid-write leaves
//! either the previous snapshot or the new one, never half of each.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use foodie_core::error::StorageResult;
use foodie_core::{KeyValueStore, StorageError};
use tracing::{debug, trace};

const FILE_EXTENSION: &str = "json";

/// A [`KeyValueStore`] that keeps each key in its own file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            key: root.display().to_string(),
            source,
        })?;

        debug!(root = %root.display(), "File store opened");
        Ok(FileStore { root })
    }

    /// Directory the slot files live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds `key`.
    ///
    /// Keys are limited to ASCII letters, digits, `-`, `_` and `.`, and may
    /// not start with a dot, so a key can never name a path outside `root`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key.len() <= 128
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(format!("{key}.{FILE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        trace!(path = %path.display(), "Reading slot");

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(key, source)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension(format!("{FILE_EXTENSION}.tmp"));
        trace!(path = %path.display(), bytes = value.len(), "Writing slot");

        fs::write(&tmp, value).map_err(|source| io_error(key, source))?;
        fs::rename(&tmp, &path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            io_error(key, source)
        })
    }
}

fn io_error(key: &str, source: io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use foodie_core::{CartSession, CartStore, MenuItem, Money, Notice, CART_STORAGE_KEY};
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_key_reads_none() {
        let (_dir, store) = store();
        assert_eq!(store.get("foodie-cart").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let (_dir, mut store) = store();

        store.set("foodie-cart", "{\"items\":[]}").unwrap();
        store.set("foodie-cart", "{}").unwrap();

        assert_eq!(store.get("foodie-cart").unwrap().as_deref(), Some("{}"));
        assert!(store.root().join("foodie-cart.json").exists());
        assert!(!store.root().join("foodie-cart.json.tmp").exists());
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let store = FileStore::open(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(store.root(), nested.as_path());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (_dir, mut store) = store();

        for key in ["", "../escape", "a/b", ".hidden", "with space"] {
            assert!(
                matches!(store.set(key, "x"), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let (dir, mut store) = store();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("k.json")]);
    }

    #[test]
    fn test_cart_survives_reopen() {
        let (dir, store) = store();
        let mut session = CartSession::open(CartStore::new(store));
        let naan = MenuItem::new("m3", "1", "Garlic Naan", Money::from_major(60));
        session.add_item(&naan, "1", "The Spice Garden", None);
        session.update_quantity("m3", 3);
        drop(session);

        let reopened = CartSession::open(CartStore::new(FileStore::open(dir.path()).unwrap()));

        assert_eq!(reopened.total_items(), 3);
        assert_eq!(reopened.subtotal(), Money::from_major(180));
    }

    #[test]
    fn test_snapshot_file_is_flat_json() {
        let (dir, store) = store();
        let mut session = CartSession::open(CartStore::new(store));
        let naan = MenuItem::new("m3", "1", "Garlic Naan", Money::from_major(60));
        session.add_item(&naan, "1", "The Spice Garden", None);

        let raw = fs::read_to_string(dir.path().join(format!("{CART_STORAGE_KEY}.json"))).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["restaurantId"], "1");
        assert_eq!(json["items"][0]["quantity"], 1);
        assert!(json["timestamp"].is_i64());
    }

    #[test]
    fn test_corrupt_file_opens_empty_cart() {
        let (dir, mut store) = store();
        store.set(CART_STORAGE_KEY, "not json").unwrap();

        let mut session = CartSession::open(CartStore::new(FileStore::open(dir.path()).unwrap()));

        assert!(session.cart().is_empty());
        assert!(!session.take_notices().contains(&Notice::CartExpired));
    }
}
