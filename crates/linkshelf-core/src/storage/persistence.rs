//! Key-value persistence
//!
//! The store reads and writes whole values under string keys through the
//! `KeyValueStore` trait. Values are JSON-encoded; a write fully replaces
//! whatever was stored under the key before.
//!
//! `JsonFileStore` keeps one file per key in the data directory:
//! - `bookmarks.json`
//! - `categories.json`
//!
//! Files are written atomically (write to temp file, then rename).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::{StorageError, StorageResult};

/// Key holding the bookmark list
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Key holding the category list
pub const CATEGORIES_KEY: &str = "categories";

/// Synchronous get/set of serialized values by key
pub trait KeyValueStore {
    /// Raw stored text for `key`, or `None` if nothing was written yet
    fn read_raw(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the stored text for `key`
    fn write_raw(&mut self, key: &str, value: String) -> StorageResult<()>;

    /// Whether a value has been stored under `key`
    fn contains(&self, key: &str) -> bool {
        matches!(self.read_raw(key), Ok(Some(_)))
    }

    /// Decode the value under `key`, or return `default`
    ///
    /// Missing keys, unreadable storage and undecodable values all yield
    /// `default`; the latter two are logged.
    fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.read_raw(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Stored value for '{}' is not valid, using default: {}", key, e);
                    default
                }
            },
            Ok(None) => {
                debug!("No stored value for '{}', using default", key);
                default
            }
            Err(e) => {
                warn!("Could not read '{}', using default: {}", key, e);
                default
            }
        }
    }

    /// Encode `value` and store it under `key`
    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        let encoded = serde_json::to_string_pretty(value).map_err(|source| {
            StorageError::Serialize {
                key: key.to_string(),
                source,
            }
        })?;
        self.write_raw(key, encoded)
    }
}

/// File-backed store: one JSON file per key
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the value files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path backing `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Total bytes used by the given keys on disk
    pub fn disk_usage(&self, keys: &[&str]) -> u64 {
        keys.iter()
            .filter_map(|key| self.path_for(key).ok())
            .filter_map(|path| fs::metadata(path).ok())
            .map(|meta| meta.len())
            .sum()
    }
}

impl KeyValueStore for JsonFileStore {
    fn read_raw(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::ReadError { path, source })
    }

    fn write_raw(&mut self, key: &str, value: String) -> StorageResult<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes())?;
        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
