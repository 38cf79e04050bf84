//! Two-tier persistence for dictionary snapshots.
//!
//! A `CacheSnapshot` bundles the compressed word payload, the matching
//! frequency table, a creation timestamp and the schema version. Stores
//! implement `CacheStore`; `TieredCache` reads the durable store first and
//! falls back to a key-value store when the durable one is unavailable or
//! holds nothing the caller accepts.

mod file;
mod kv;
mod memory;

pub use file::SnapshotFile;
pub use kv::KeyValueFile;
pub use memory::MemoryStore;

use std::io;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::dict::{self, CodecError, WordSet};
use crate::frequency::FrequencyTable;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] CodecError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub(crate) fn now_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSnapshot {
    pub compressed_words: Vec<u8>,
    pub compressed_frequency_table: Vec<u8>,
    /// Creation time, seconds since the Unix epoch.
    pub timestamp: u64,
    pub schema_version: String,
}

impl CacheSnapshot {
    pub fn build(
        words: &WordSet,
        frequencies: &FrequencyTable,
        schema_version: &str,
        timestamp: u64,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            compressed_words: dict::encode(words)?,
            compressed_frequency_table: frequencies.to_bytes(words)?,
            timestamp,
            schema_version: schema_version.to_string(),
        })
    }

    /// A snapshot is reusable only while younger than `max_age` and written
    /// under the same schema version.
    pub fn is_valid_at(&self, now: u64, max_age: Duration, schema_version: &str) -> bool {
        self.schema_version == schema_version
            && now.saturating_sub(self.timestamp) < max_age.as_secs()
    }

    pub fn restore(&self) -> Result<(WordSet, FrequencyTable), CodecError> {
        let words = dict::decode(&self.compressed_words)?;
        let frequencies = FrequencyTable::from_bytes(&self.compressed_frequency_table, &words)?;
        Ok((words, frequencies))
    }
}

/// A place a single dictionary snapshot can be kept.
///
/// Writes replace the whole snapshot; a reader sees either a complete
/// earlier snapshot or none.
pub trait CacheStore: Send + Sync {
    fn read(&self) -> Result<Option<CacheSnapshot>, CacheError>;

    /// The first snapshot `accept` takes, consulting each tier in order.
    fn read_accepted(
        &self,
        accept: &mut dyn FnMut(&CacheSnapshot) -> bool,
    ) -> Result<Option<CacheSnapshot>, CacheError> {
        Ok(self.read()?.filter(|snapshot| accept(snapshot)))
    }

    fn write(&self, snapshot: &CacheSnapshot) -> Result<(), CacheError>;
    fn clear(&self) -> Result<(), CacheError>;

    /// Human-readable store name for logs.
    fn name(&self) -> &str;
}

/// Durable store backed by a key-value fallback.
pub struct TieredCache {
    durable: Option<Box<dyn CacheStore>>,
    fallback: Box<dyn CacheStore>,
}

impl TieredCache {
    pub fn new(durable: Option<Box<dyn CacheStore>>, fallback: Box<dyn CacheStore>) -> Self {
        Self { durable, fallback }
    }

    /// `SnapshotFile` at `<dir>/dictionary.wsnp` over `KeyValueFile` at
    /// `<dir>/kv.json`.
    pub fn in_dir(dir: &std::path::Path, key: &str) -> Self {
        Self::new(
            Some(Box::new(SnapshotFile::new(dir.join("dictionary.wsnp")))),
            Box::new(KeyValueFile::new(dir.join("kv.json"), key)),
        )
    }
}

impl CacheStore for TieredCache {
    fn read(&self) -> Result<Option<CacheSnapshot>, CacheError> {
        self.read_accepted(&mut |_| true)
    }

    fn read_accepted(
        &self,
        accept: &mut dyn FnMut(&CacheSnapshot) -> bool,
    ) -> Result<Option<CacheSnapshot>, CacheError> {
        if let Some(durable) = &self.durable {
            match durable.read_accepted(accept) {
                Ok(Some(snapshot)) => return Ok(Some(snapshot)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(store = durable.name(), error = %e, "durable cache read failed");
                }
            }
        }
        self.fallback.read_accepted(accept)
    }

    fn write(&self, snapshot: &CacheSnapshot) -> Result<(), CacheError> {
        if let Some(durable) = &self.durable {
            match durable.write(snapshot) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(store = durable.name(), error = %e, "durable cache write failed");
                }
            }
        }
        self.fallback.write(snapshot)
    }

    fn clear(&self) -> Result<(), CacheError> {
        if let Some(durable) = &self.durable {
            durable.clear()?;
        }
        self.fallback.clear()
    }

    fn name(&self) -> &str {
        "tiered"
    }
}
