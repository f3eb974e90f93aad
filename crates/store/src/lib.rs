//! Key-value settings store used by the counters and preference layers.
//!
//! Reads never fail: a missing key, or a key holding a value of another type,
//! yields the caller's default. Writes report I/O and serialization failures.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings file error: {0}")]
    Io(#[from] io::Error),
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

pub trait SettingsStore {
    fn get_value(&self, key: &str) -> Option<StoredValue>;
    fn set_value(&mut self, key: &str, value: StoredValue) -> Result<()>;
    /// Remove `key`, returning whether it was present.
    fn remove(&mut self, key: &str) -> Result<bool>;
    fn clear(&mut self) -> Result<()>;

    fn contains(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get_value(key) {
            Some(StoredValue::Int(value)) => value,
            _ => default,
        }
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.set_value(key, StoredValue::Int(value))
    }

    fn get_string(&self, key: &str, default: Option<&str>) -> Option<String> {
        match self.get_value(key) {
            Some(StoredValue::Text(value)) => Some(value),
            _ => default.map(str::to_owned),
        }
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, StoredValue::Text(value.to_owned()))
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get_value(key) {
            Some(StoredValue::Bool(value)) => value,
            _ => default,
        }
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.set_value(key, StoredValue::Bool(value))
    }

    /// Integers widen to floats.
    fn get_float(&self, key: &str, default: f64) -> f64 {
        match self.get_value(key) {
            Some(StoredValue::Float(value)) => value,
            Some(StoredValue::Int(value)) => value as f64,
            _ => default,
        }
    }

    fn set_float(&mut self, key: &str, value: f64) -> Result<()> {
        self.set_value(key, StoredValue::Float(value))
    }
}

/// Process-local store, lost on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<StoredValue> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: StoredValue) -> Result<()> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.values.remove(key).is_some())
    }

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        Ok(())
    }
}

/// Store persisted as a pretty-printed JSON object, rewritten on every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, StoredValue>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; the file is created
    /// on the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "settings file not found, starting empty");
                BTreeMap::new()
            }
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), keys = values.len(), "opened settings store");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `values` to disk, then adopt them. On failure the store keeps its
    /// previous contents, matching what is on disk.
    fn commit(&mut self, values: BTreeMap<String, StoredValue>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, contents).inspect_err(|err| {
            warn!(path = %self.path.display(), error = %err, "failed to write settings");
        })?;
        debug!(path = %self.path.display(), keys = values.len(), "settings saved");
        self.values = values;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn get_value(&self, key: &str) -> Option<StoredValue> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: StoredValue) -> Result<()> {
        let mut next = self.values.clone();
        next.insert(key.to_owned(), value);
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        if !self.values.contains_key(key) {
            return Ok(false);
        }
        let mut next = self.values.clone();
        next.remove(key);
        self.commit(next)?;
        Ok(true)
    }

    fn clear(&mut self) -> Result<()> {
        self.commit(BTreeMap::new())
    }
}
