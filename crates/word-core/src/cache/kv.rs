use std::fs;
use std::io;
use std::path::PathBuf;

use serde_json::{Map, Value};

use super::file::write_atomic;
use super::{CacheError, CacheSnapshot, CacheStore};

/// Fallback store: a JSON object file mapping string keys to values.
///
/// The snapshot lives under one fixed key; other keys in the document are
/// preserved on write.
pub struct KeyValueFile {
    path: PathBuf,
    key: String,
}

impl KeyValueFile {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    fn load_document(&self) -> Result<Map<String, Value>, CacheError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Map::new()),
            Ok(bytes) => match serde_json::from_slice(&bytes)? {
                Value::Object(map) => Ok(map),
                _ => Err(CacheError::Unavailable(format!(
                    "{} is not a JSON object",
                    self.path.display()
                ))),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store_document(&self, doc: Map<String, Value>) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(&Value::Object(doc))?;
        write_atomic(&self.path, &bytes)
    }
}

impl CacheStore for KeyValueFile {
    fn read(&self) -> Result<Option<CacheSnapshot>, CacheError> {
        let mut doc = self.load_document()?;
        match doc.remove(&self.key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn write(&self, snapshot: &CacheSnapshot) -> Result<(), CacheError> {
        let mut doc = self.load_document()?;
        doc.insert(self.key.clone(), serde_json::to_value(snapshot)?);
        self.store_document(doc)
    }

    fn clear(&self) -> Result<(), CacheError> {
        let mut doc = self.load_document()?;
        if doc.remove(&self.key).is_some() {
            self.store_document(doc)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "key-value-file"
    }
}
