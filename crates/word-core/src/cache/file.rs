use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{CacheError, CacheSnapshot, CacheStore};
use crate::dict::{frame, unframe, CodecError};

const MAGIC: &[u8; 4] = b"WSNP";
const VERSION: u8 = 1;

/// Durable snapshot store: one framed bincode file.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn to_bytes(snapshot: &CacheSnapshot) -> Result<Vec<u8>, CacheError> {
        let body = bincode::serialize(snapshot).map_err(CodecError::Serialize)?;
        Ok(frame(MAGIC, VERSION, &body))
    }

    pub fn from_bytes(data: &[u8]) -> Result<CacheSnapshot, CacheError> {
        let body = unframe(data, MAGIC, VERSION)?;
        Ok(bincode::deserialize(body).map_err(CodecError::Deserialize)?)
    }
}

impl CacheStore for SnapshotFile {
    fn read(&self) -> Result<Option<CacheSnapshot>, CacheError> {
        match fs::read(&self.path) {
            Ok(bytes) => Self::from_bytes(&bytes).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Atomic write: write to .tmp then rename.
    fn write(&self, snapshot: &CacheSnapshot) -> Result<(), CacheError> {
        let bytes = Self::to_bytes(snapshot)?;
        write_atomic(&self.path, &bytes)
    }

    fn clear(&self) -> Result<(), CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "snapshot-file"
    }
}

pub(super) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let tmp = path.with_extension("tmp");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
