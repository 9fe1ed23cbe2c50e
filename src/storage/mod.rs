//! # Persisted Store
//!
//! A small string key/value store standing in for browser local storage.
//!
//! ```text
//! ~/.localeats/storage/
//! ├── favorites                    // [1, 7]
//! ├── localeats_restaurants_cache  // [Restaurant, ...]
//! └── localeats_cache_timestamp    // 1760781234567
//! ```
//!
//! One file per key. Writes go to `<key>.tmp` first and are renamed into
//! place, so a crash never leaves a half-written value. When the directory
//! cannot be used the app falls back to `Store::in_memory()`.
//!
//! There is no locking: the event loop is the only writer.

pub mod cache;
pub mod favorites;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use cache::RestaurantCache;

pub const FAVORITES_KEY: &str = "favorites";
pub const CACHE_KEY: &str = "localeats_restaurants_cache";
pub const CACHE_TIMESTAMP_KEY: &str = "localeats_cache_timestamp";

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Serialize(e) => write!(f, "storage serialization error: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialize(e)
    }
}

enum Backend {
    Disk(PathBuf),
    Memory(Mutex<HashMap<String, String>>),
}

pub struct Store {
    backend: Backend,
}

/// Returns `~/.localeats/storage`.
pub fn default_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".localeats").join("storage"))
}

impl Store {
    /// Open (and create if needed) a directory-backed store.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("Opened store at {}", dir.display());
        Ok(Self {
            backend: Backend::Disk(dir),
        })
    }

    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(HashMap::new())),
        }
    }

    /// Open `dir`, falling back to memory (with a warning) when that fails.
    pub fn open_or_memory(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => match Store::open(&dir) {
                Ok(store) => store,
                Err(e) => {
                    warn!(
                        "Cannot use storage at {}: {}. Continuing in memory",
                        dir.display(),
                        e
                    );
                    Store::in_memory()
                }
            },
            None => {
                warn!("No storage directory available. Continuing in memory");
                Store::in_memory()
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, Backend::Disk(_))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.backend {
            Backend::Disk(dir) => {
                let path = key_path(dir, key);
                match fs::read_to_string(&path) {
                    Ok(value) => Ok(Some(value)),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(e.into()),
                }
            }
            Backend::Memory(map) => Ok(lock(map).get(key).cloned()),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match &self.backend {
            Backend::Disk(dir) => {
                atomic_write(&key_path(dir, key), value)?;
                Ok(())
            }
            Backend::Memory(map) => {
                lock(map).insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match &self.backend {
            Backend::Disk(dir) => match fs::remove_file(key_path(dir, key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
            Backend::Memory(map) => {
                lock(map).remove(key);
                Ok(())
            }
        }
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.set(key, &json)
    }
}

fn lock(map: &Mutex<HashMap<String, String>>) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(key)
}

/// Write `value` to `path` via `<path>.tmp` + rename.
fn atomic_write(path: &Path, value: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, value)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
