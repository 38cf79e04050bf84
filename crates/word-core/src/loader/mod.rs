//! Dictionary acquisition.
//!
//! `DictionaryLoader::load` serves a fresh cached snapshot when one exists;
//! otherwise it fetches the word list through a [`WordSource`] under the
//! configured [`RetryPolicy`], builds the frequency table and hands a new
//! snapshot to a background write-back thread. A failed write-back is logged
//! and never fails the load.

mod retry;
mod source;

pub use retry::{AttemptError, RetryError, RetryPolicy};
pub use source::{FetchError, FileSource, HttpSource, TextSource, WordSource};

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{now_epoch, CacheError, CacheSnapshot, CacheStore, TieredCache};
use crate::dict::{CodecError, WordSet};
use crate::frequency::FrequencyTable;
use crate::settings::Settings;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("word source unavailable after {attempts} attempt(s): {reason}")]
    SourceUnavailable { attempts: u32, reason: String },

    #[error("word source contained no valid words")]
    EmptySource,

    #[error("cached dictionary is corrupt: {0}")]
    Corrupt(#[from] CodecError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Cache,
    Source,
}

/// A ready dictionary and its frequency table.
#[derive(Debug, Clone)]
pub struct LoadedDictionary {
    pub words: Arc<WordSet>,
    pub frequencies: Arc<FrequencyTable>,
    pub origin: LoadOrigin,
    /// When the underlying snapshot was built, seconds since the Unix epoch.
    pub timestamp: u64,
}

pub struct DictionaryLoader {
    source: Arc<dyn WordSource>,
    cache: Arc<dyn CacheStore>,
    retry: RetryPolicy,
    schema_version: String,
    max_age: Duration,
    chunk_size: usize,
    pending_write: Mutex<Option<JoinHandle<()>>>,
}

impl DictionaryLoader {
    pub fn new(
        source: Arc<dyn WordSource>,
        cache: Box<dyn CacheStore>,
        settings: &Settings,
    ) -> Self {
        Self {
            source,
            cache: Arc::from(cache),
            retry: settings.retry_policy(),
            schema_version: settings.cache.schema_version.clone(),
            max_age: settings.max_cache_age(),
            chunk_size: settings.frequency.chunk_size,
            pending_write: Mutex::new(None),
        }
    }

    /// The configured HTTP source over a `TieredCache` in `cache_dir`.
    pub fn http(settings: &Settings, cache_dir: &Path) -> Self {
        let source = HttpSource::new(
            &settings.source.url,
            Duration::from_millis(settings.source.timeout_ms),
        );
        let cache = TieredCache::in_dir(cache_dir, &settings.cache.key);
        Self::new(Arc::new(source), Box::new(cache), settings)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn cache(&self) -> &dyn CacheStore {
        self.cache.as_ref()
    }

    pub fn load(&self) -> Result<LoadedDictionary, LoadError> {
        self.load_at(now_epoch())
    }

    /// [`DictionaryLoader::load`] with an explicit clock.
    ///
    /// Stale, mismatched and corrupt snapshots all fall through to the source.
    pub fn load_at(&self, now: u64) -> Result<LoadedDictionary, LoadError> {
        match self.load_cached_at(now) {
            Ok(Some(dict)) => return Ok(dict),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "discarding cached dictionary"),
        }
        self.load_from_source(now)
    }

    /// Only the cache: `Ok(None)` when there is no usable snapshot.
    ///
    /// Every tier is consulted until one holds a fresh snapshot that decodes.
    /// When none does and some fresh snapshot failed to decode, that failure
    /// is reported as `LoadError::Corrupt`.
    pub fn load_cached_at(&self, now: u64) -> Result<Option<LoadedDictionary>, LoadError> {
        self.wait_for_write_back();

        let mut restored = None;
        let mut corrupt = None;
        let found = self.cache.read_accepted(&mut |snapshot| {
            if !snapshot.is_valid_at(now, self.max_age, &self.schema_version) {
                debug!(
                    timestamp = snapshot.timestamp,
                    schema_version = %snapshot.schema_version,
                    "skipping stale cached dictionary"
                );
                return false;
            }
            match snapshot.restore() {
                Ok(pair) => {
                    restored = Some(pair);
                    true
                }
                Err(e) => {
                    warn!(error = %e, "skipping undecodable cached dictionary");
                    corrupt = Some(e);
                    false
                }
            }
        });

        let snapshot = match found {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                if let Some(e) = corrupt {
                    return Err(LoadError::Corrupt(e));
                }
                debug!(store = self.cache.name(), "no usable cached dictionary");
                return Ok(None);
            }
            Err(CacheError::Corrupt(e)) => return Err(LoadError::Corrupt(e)),
            Err(e) => {
                warn!(store = self.cache.name(), error = %e, "cache read failed");
                return Ok(None);
            }
        };

        let (words, frequencies) = match restored {
            Some(pair) => pair,
            None => snapshot.restore()?,
        };
        info!(words = words.len(), "dictionary restored from cache");
        Ok(Some(LoadedDictionary {
            words: Arc::new(words),
            frequencies: Arc::new(frequencies),
            origin: LoadOrigin::Cache,
            timestamp: snapshot.timestamp,
        }))
    }

    /// Ignore the cache, fetch from the source and replace the snapshot.
    pub fn refresh(&self) -> Result<LoadedDictionary, LoadError> {
        self.load_from_source(now_epoch())
    }

    fn load_from_source(&self, now: u64) -> Result<LoadedDictionary, LoadError> {
        let source = Arc::clone(&self.source);
        let text = self
            .retry
            .run(move |attempt| {
                debug!(attempt, source = %source.describe(), "fetching word list");
                source.fetch()
            })
            .map_err(|e| LoadError::SourceUnavailable {
                attempts: e.attempts,
                reason: e.last.to_string(),
            })?;

        let words = WordSet::from_text(&text);
        if words.is_empty() {
            return Err(LoadError::EmptySource);
        }
        let frequencies = FrequencyTable::build(&words, self.chunk_size);
        let (word_count, classes) = words.stats();
        info!(words = word_count, classes, "dictionary built from source");

        let words = Arc::new(words);
        let frequencies = Arc::new(frequencies);
        self.write_back(Arc::clone(&words), Arc::clone(&frequencies), now);

        Ok(LoadedDictionary {
            words,
            frequencies,
            origin: LoadOrigin::Source,
            timestamp: now,
        })
    }

    /// Block until the last snapshot handed to the write-back thread is
    /// stored (or has failed and been logged).
    pub fn wait_for_write_back(&self) {
        let pending = self
            .pending_write
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            if handle.join().is_err() {
                warn!("cache write-back thread panicked");
            }
        }
    }

    /// Encode and store the snapshot on a detached thread; the load that
    /// produced it returns without waiting. Writes land in load order.
    fn write_back(&self, words: Arc<WordSet>, frequencies: Arc<FrequencyTable>, now: u64) {
        self.wait_for_write_back();

        let cache = Arc::clone(&self.cache);
        let schema_version = self.schema_version.clone();
        let spawned = thread::Builder::new()
            .name("word-cache-write".into())
            .spawn(move || store_snapshot(&*cache, &words, &frequencies, &schema_version, now));
        match spawned {
            Ok(handle) => {
                *self
                    .pending_write
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(handle);
            }
            Err(e) => warn!(error = %e, "failed to start cache write-back"),
        }
    }
}

impl Drop for DictionaryLoader {
    fn drop(&mut self) {
        self.wait_for_write_back();
    }
}

fn store_snapshot(
    cache: &dyn CacheStore,
    words: &WordSet,
    frequencies: &FrequencyTable,
    schema_version: &str,
    now: u64,
) {
    let snapshot = match CacheSnapshot::build(words, frequencies, schema_version, now) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "failed to encode dictionary snapshot");
            return;
        }
    };
    match cache.write(&snapshot) {
        Ok(()) => debug!(store = cache.name(), timestamp = now, "dictionary cached"),
        Err(e) => warn!(store = cache.name(), error = %e, "failed to cache dictionary"),
    }
}
