use std::sync::Mutex;

use super::{CacheError, CacheSnapshot, CacheStore};

/// In-process store; contents are lost when dropped.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<CacheSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: CacheSnapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }
}

impl CacheStore for MemoryStore {
    fn read(&self) -> Result<Option<CacheSnapshot>, CacheError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| CacheError::Unavailable("memory store poisoned".into()))?;
        Ok(slot.clone())
    }

    fn write(&self, snapshot: &CacheSnapshot) -> Result<(), CacheError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| CacheError::Unavailable("memory store poisoned".into()))?;
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| CacheError::Unavailable("memory store poisoned".into()))?;
        *slot = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
