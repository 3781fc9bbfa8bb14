//! Local persistent key/value storage
//!
//! Mirrors the host's local storage: string keys, string values, small
//! payloads. [`FileStorage`] keeps a JSON object on disk for headless hosts.

use crate::error::{CoreError, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// Host local storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local storage (lost at exit)
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<FxHashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

/// Storage persisted as a flat JSON object in a single file
pub struct FileStorage {
    path: PathBuf,
    /// Loaded lazily on first access
    cache: Mutex<Option<serde_json::Map<String, serde_json::Value>>>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(serde_json::Map::new());
        }
        match serde_json::from_str::<serde_json::Value>(&raw)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(CoreError::Storage(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn with_entries<R>(
        &self,
        f: impl FnOnce(&mut serde_json::Map<String, serde_json::Value>) -> R,
    ) -> Result<R> {
        let mut cache = self.cache.lock().unwrap();
        if cache.is_none() {
            *cache = Some(self.load()?);
        }
        match cache.as_mut() {
            Some(entries) => Ok(f(entries)),
            None => Err(CoreError::Storage("storage cache unavailable".to_string())),
        }
    }

    fn flush(&self, entries: &serde_json::Map<String, serde_json::Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| {
            entries
                .get(key)
                .and_then(|value| value.as_str())
                .map(str::to_string)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let snapshot = self.with_entries(|entries| {
            entries.insert(
                key.to_string(),
                serde_json::Value::String(value.to_string()),
            );
            entries.clone()
        })?;
        self.flush(&snapshot)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let snapshot = self.with_entries(|entries| {
            entries.remove(key);
            entries.clone()
        })?;
        self.flush(&snapshot)
    }
}
