//! Word-matching and dictionary-distribution engine.
//!
//! The algorithmic core lives in `word_core` and is re-exported here. This
//! crate adds the host-facing piece: a [`SearchWorker`] that owns one
//! dictionary on a background thread.

pub mod async_worker;

pub use async_worker::{SearchWorker, WorkerError, WorkerRequest, WorkerResponse};
pub use word_core::{cache, dict, frequency, loader, matcher, settings};
