//! Key/value persistence for settings and high scores
//!
//! Backends:
//! - [`MemoryStorage`]: tests and headless runs
//! - [`FileStorage`]: one JSON file per key (native)
//! - [`LocalStorage`]: browser LocalStorage (wasm32)
//!
//! Values are JSON strings; [`load_json`]/[`save_json`] handle the encoding.

mod error;

pub use error::{PersistenceError, PersistenceResult};

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// String key/value store
pub trait Storage {
    /// Stored value for `key`, `None` if never written
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()>;
}

/// Decode the JSON value stored under `key`
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> PersistenceResult<Option<T>> {
    let Some(json) = storage.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| PersistenceError::Serialize {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` as JSON under `key`
pub fn save_json<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> PersistenceResult<()> {
    let json = serde_json::to_string(value).map_err(|source| PersistenceError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.set_item(key, &json)
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory
///
/// Writes go to a temporary file first and are renamed into place.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        let io_err = |source| PersistenceError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(io_err)?;
        std::fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Open the window's LocalStorage
    pub fn open() -> PersistenceResult<Self> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable {
                context: "window.localStorage",
            })?;
        Ok(Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        self.inner
            .get_item(key)
            .map_err(|_| PersistenceError::Unavailable {
                context: "localStorage.getItem",
            })
    }

    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.inner
            .set_item(key, value)
            .map_err(|_| PersistenceError::Unavailable {
                context: "localStorage.setItem",
            })
    }
}
