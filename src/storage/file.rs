/// TOML-file storage backend
///
/// Values live in a flat table keyed by setting key. Every write is persisted
/// immediately; failures are logged and the in-memory value is kept so the UI
/// stays consistent with what the user just did.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{SettingsStorage, StoredValue};
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct TomlFileStorage {
    path: PathBuf,
    values: BTreeMap<String, StoredValue>,
}

impl TomlFileStorage {
    /// Open the file at `path`, starting empty if it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            tracing::debug!("STORAGE: {} does not exist, starting empty", path.display());
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        let values = parse_values(&content).map_err(|source| StorageError::Parse {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("STORAGE: Loaded {} values from {}", values.len(), path.display());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored values, ordered by key
    pub fn values(&self) -> &BTreeMap<String, StoredValue> {
        &self.values
    }

    /// Write the current values to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        let content = toml::to_string_pretty(&self.values)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn parse_values(content: &str) -> Result<BTreeMap<String, StoredValue>, toml::de::Error> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    toml::from_str(content)
}

impl SettingsStorage for TomlFileStorage {
    fn read(&self, key: &str) -> Option<StoredValue> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: StoredValue) {
        tracing::trace!("STORAGE: {} = {}", key, value);
        self.values.insert(key.to_string(), value);

        if let Err(e) = self.flush() {
            tracing::error!("STORAGE: Failed to persist '{}': {}", key, e);
        }
    }
}
