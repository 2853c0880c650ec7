use std::fs;
use std::io;
use std::path::PathBuf;

use nullstream_logging::shell_warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{AtomicFileWriter, PersistError};

/// A JSON object on disk used as a small key-value store.
///
/// Every `set` rewrites the whole file atomically. There is no locking: one
/// writer is assumed.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
    filename: String,
}

impl KeyValueStore {
    pub fn new(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }

    /// `Ok(None)` when the file or the key does not exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistError> {
        let mut entries = self.read_entries()?;
        match entries.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PersistError> {
        let mut entries = self.read_entries_for_update();
        entries.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_entries(&entries)
    }

    fn read_entries(&self) -> Result<Map<String, Value>, PersistError> {
        let path = self.path();
        let content = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&content)?)
    }

    /// Unreadable contents are replaced rather than blocking every later write.
    fn read_entries_for_update(&self) -> Map<String, Value> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                shell_warn!(
                    "Discarding unreadable store {:?} before write: {}",
                    self.path(),
                    err
                );
                Map::new()
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), PersistError> {
        let content = serde_json::to_vec_pretty(entries)?;
        AtomicFileWriter::new(self.dir.clone()).write(&self.filename, &content)?;
        Ok(())
    }
}
