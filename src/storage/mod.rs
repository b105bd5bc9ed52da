//! Key-value persistence backends for setting values.
//!
//! A backend maps a string key to an optional primitive value. Numbers are kept
//! at a single canonical precision (`f64`); leaves narrow or widen at their own
//! boundary. A missing key, or a key holding a different primitive type, reads
//! as "no value".

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub mod file;

pub use file::TomlFileStorage;

/// A primitive value held by a storage backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl StoredValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StoredValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StoredValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoredValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Bool(b) => write!(f, "{}", b),
            StoredValue::Number(n) => write!(f, "{}", n),
            StoredValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Pluggable persistence backend
///
/// Implementors only provide `read` and `write`; the typed helpers are what the
/// node model calls. Writing `None` through a typed helper is a no-op.
pub trait SettingsStorage {
    /// Return the value stored under `key`, if any
    fn read(&self, key: &str) -> Option<StoredValue>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&mut self, key: &str, value: StoredValue);

    fn read_bool(&self, key: &str) -> Option<bool> {
        self.read(key).and_then(|v| v.as_bool())
    }

    fn read_number(&self, key: &str) -> Option<f64> {
        self.read(key).and_then(|v| v.as_number())
    }

    fn read_text(&self, key: &str) -> Option<String> {
        self.read(key).and_then(|v| v.as_text().map(str::to_string))
    }

    fn write_bool(&mut self, key: &str, value: Option<bool>) {
        if let Some(v) = value {
            self.write(key, StoredValue::Bool(v));
        }
    }

    fn write_number(&mut self, key: &str, value: Option<f64>) {
        if let Some(v) = value {
            self.write(key, StoredValue::Number(v));
        }
    }

    fn write_text(&mut self, key: &str, value: Option<String>) {
        if let Some(v) = value {
            self.write(key, StoredValue::Text(v));
        }
    }
}

/// Shared handle to a storage backend
///
/// The whole tree lives on the presentation thread, so a single-threaded
/// reference-counted cell is enough.
pub type StorageHandle = Rc<RefCell<dyn SettingsStorage>>;

/// Wrap a backend into a shareable handle
pub fn shared<S: SettingsStorage + 'static>(storage: S) -> StorageHandle {
    Rc::new(RefCell::new(storage))
}

/// In-memory backend, mostly useful for tests and previews
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, StoredValue>,
}

impl MemoryStorage {
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

impl SettingsStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<StoredValue> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: StoredValue) {
        tracing::trace!("STORAGE: {} = {}", key, value);
        self.values.insert(key.to_string(), value);
    }
}
