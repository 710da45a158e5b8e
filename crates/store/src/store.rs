//! File-backed key-value store
//!
//! ## Design
//!
//! The whole document lives in memory as a `BTreeMap<String, Value>` and
//! is rewritten to disk on every mutation, so the map and the file agree
//! the moment a mutating call returns. The write goes to a sibling temp
//! file first and is renamed over the document, so readers never observe
//! a half-written file.
//!
//! ## Thread Safety
//!
//! `LocalStore` is `Send + Sync`; the map is guarded by a `RwLock` and the
//! persist happens under the write lock. Cross-process sharing is not
//! supported.
//!
//! ## API
//!
//! - **Plain entries**: `set`, `get`, `remove`, `clear`, `has`
//! - **Expiring entries**: `set_with_expiry`, `set_with_expiry_at`,
//!   `get_with_expiry` — same namespace, lazy read-time expiry

use crate::cache::CacheEntry;
use crate::config::StoreConfig;
use larder_core::{Error, Result, Timestamp};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Durable key-value store over a single JSON document
///
/// # Example
///
/// ```ignore
/// use larder_store::LocalStore;
///
/// let store = LocalStore::open(".storage")?;
/// store.set("greeting", &"hello")?;
/// let value: Option<String> = store.get("greeting")?;
/// ```
#[derive(Debug)]
pub struct LocalStore {
    /// Backing file path
    path: PathBuf,
    /// Pretty-print the persisted document
    pretty: bool,
    /// In-memory mirror of the on-disk document
    entries: RwLock<BTreeMap<String, Value>>,
}

impl LocalStore {
    /// Open the store rooted at a storage directory
    ///
    /// Creates the directory if missing, loads (or initializes) the
    /// `larder.toml` config, and opens the data document it names.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let config = StoreConfig::load_or_init(root)?;
        Self::open_at(config.data_path(root), config.pretty)
    }

    /// Open the store at an explicit data document path
    ///
    /// The containing directory is created if missing. An existing file is
    /// parsed as a single JSON object and adopted as the initial mapping;
    /// a missing file means an empty store, and the file is not created
    /// until the first mutation.
    ///
    /// # Errors
    ///
    /// Returns `Error::Corrupt` if the file exists but is not a valid JSON
    /// object. Starting empty over an unreadable file would mask data
    /// loss, so the open fails instead.
    pub fn open_at<P: AsRef<Path>>(path: P, pretty: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str::<BTreeMap<String, Value>>(&content).map_err(|e| {
                Error::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            })?
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened local store");

        Ok(LocalStore {
            path,
            pretty,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing data document
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ========== Plain entries ==========

    /// Store a value under a key, overwriting any existing entry
    ///
    /// The full document is persisted before this returns. A persistence
    /// failure propagates to the caller.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))?;
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), json);
        self.persist(&entries)
    }

    /// Read a value back, verbatim
    ///
    /// Returns `Ok(None)` for an unset key. TTL wrappers are not
    /// interpreted; a wrapped entry read through `get` comes back as the
    /// wrapper object itself.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the stored value does not match
    /// the requested type.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| Error::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// Delete a key, reporting whether it was present
    ///
    /// Removing an absent key is a valid no-op. The document is persisted
    /// afterward either way.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write();
        let existed = entries.remove(key).is_some();
        self.persist(&entries)?;
        Ok(existed)
    }

    /// Delete all keys and persist the empty document
    pub fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write();
        entries.clear();
        self.persist(&entries)
    }

    /// Existence check, without deserializing the value
    pub fn has(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Number of entries, plain and wrapped alike
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    // ========== Expiring entries ==========

    /// Store a value that expires `ttl_minutes` from now
    pub fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_minutes: u64,
    ) -> Result<()> {
        self.set_with_expiry_at(key, value, Timestamp::now().saturating_add_minutes(ttl_minutes))
    }

    /// Store a value with an explicit expiry timestamp
    pub fn set_with_expiry_at<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        expiry: Timestamp,
    ) -> Result<()> {
        let json = serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))?;
        self.set(key, &CacheEntry::new(json, expiry))
    }

    /// Read an expiring value, honoring its TTL
    ///
    /// Returns `Ok(None)` when the key is unset, when the stored value is
    /// not a cache wrapper, or when the entry has expired. An expired
    /// entry is deleted as a side effect of the read; there is no
    /// background sweeper.
    pub fn get_with_expiry<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw = {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(value) => value.clone(),
                None => return Ok(None),
            }
        };

        let entry: CacheEntry = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(_) => {
                debug!(key, "stored value is not a cache entry");
                return Ok(None);
            }
        };

        if entry.is_expired(Timestamp::now()) {
            self.remove(key)?;
            return Ok(None);
        }

        serde_json::from_value(entry.value)
            .map(Some)
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Serialize the whole document and overwrite the backing file
    ///
    /// Writes a sibling temp file and renames it over the document.
    /// Called with the write lock held so memory and disk stay in step.
    fn persist(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        let body = if self.pretty {
            serde_json::to_vec_pretty(entries)
        } else {
            serde_json::to_vec(entries)
        }
        .map_err(|e| Error::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
