use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::{debug, info_span, warn};
use word_core::dict::WordSet;
use word_core::frequency::FrequencyTable;
use word_core::loader::{DictionaryLoader, LoadError};
use word_core::matcher::{MatchEngine, QueryError, SearchQuery};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum WorkerRequest {
    LoadDictionary,
    SearchWords {
        query: SearchQuery,
        correlation_id: u64,
    },
}

#[derive(Debug, Clone)]
pub enum WorkerResponse {
    DictionaryLoaded {
        words: Arc<WordSet>,
        frequencies: Arc<FrequencyTable>,
    },
    SearchResults {
        results: Vec<String>,
        correlation_id: u64,
    },
    /// `correlation_id` is set when the failure belongs to a search.
    Error {
        message: String,
        correlation_id: Option<u64>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("dictionary not loaded yet")]
    DictionaryNotReady,

    #[error("dictionary load failed: {0}")]
    Load(#[from] LoadError),

    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("worker thread has stopped")]
    Disconnected,
}

impl WorkerResponse {
    fn error(err: &WorkerError, correlation_id: Option<u64>) -> Self {
        Self::Error {
            message: err.to_string(),
            correlation_id,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchWorker
// ---------------------------------------------------------------------------

/// Owns one dictionary on a dedicated thread and answers requests in
/// arrival order.
///
/// Dropping the worker closes the request channel and joins the thread once
/// the request in progress (if any) completes.
pub struct SearchWorker {
    request_tx: Option<mpsc::Sender<WorkerRequest>>,
    response_rx: Mutex<mpsc::Receiver<WorkerResponse>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SearchWorker {
    pub fn spawn(loader: DictionaryLoader) -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<WorkerRequest>();
        let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>();
        let handle = thread::Builder::new()
            .name("word-search".into())
            .spawn(move || search_worker(loader, request_rx, response_tx))?;

        Ok(Self {
            request_tx: Some(request_tx),
            response_rx: Mutex::new(response_rx),
            handle: Some(handle),
        })
    }

    pub fn send(&self, request: WorkerRequest) -> Result<(), WorkerError> {
        self.request_tx
            .as_ref()
            .ok_or(WorkerError::Disconnected)?
            .send(request)
            .map_err(|_| WorkerError::Disconnected)
    }

    pub fn load_dictionary(&self) -> Result<(), WorkerError> {
        self.send(WorkerRequest::LoadDictionary)
    }

    pub fn search(&self, query: SearchQuery, correlation_id: u64) -> Result<(), WorkerError> {
        self.send(WorkerRequest::SearchWords {
            query,
            correlation_id,
        })
    }

    /// Block until the next response; `None` once the worker has stopped.
    pub fn recv(&self) -> Option<WorkerResponse> {
        let rx = self.response_rx.lock().ok()?;
        rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<WorkerResponse> {
        let rx = self.response_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerResponse> {
        let rx = self.response_rx.lock().ok()?;
        rx.recv_timeout(timeout).ok()
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        drop(self.request_tx.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("search worker panicked");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

struct Loaded {
    words: Arc<WordSet>,
    frequencies: Arc<FrequencyTable>,
}

fn search_worker(
    loader: DictionaryLoader,
    rx: mpsc::Receiver<WorkerRequest>,
    tx: mpsc::Sender<WorkerResponse>,
) {
    let mut loaded: Option<Loaded> = None;

    while let Ok(request) = rx.recv() {
        let response = match request {
            WorkerRequest::LoadDictionary => {
                let _span = info_span!("load_dictionary").entered();
                match load(&loader, &mut loaded) {
                    Ok(dict) => WorkerResponse::DictionaryLoaded {
                        words: Arc::clone(&dict.words),
                        frequencies: Arc::clone(&dict.frequencies),
                    },
                    Err(e) => {
                        warn!(error = %e, "dictionary unavailable");
                        WorkerResponse::error(&e, None)
                    }
                }
            }
            WorkerRequest::SearchWords {
                query,
                correlation_id,
            } => {
                let _span = info_span!("search_words", correlation_id).entered();
                match search(loaded.as_ref(), &query) {
                    Ok(results) => {
                        debug!(results = results.len(), "search complete");
                        WorkerResponse::SearchResults {
                            results,
                            correlation_id,
                        }
                    }
                    Err(e) => WorkerResponse::error(&e, Some(correlation_id)),
                }
            }
        };

        if tx.send(response).is_err() {
            break;
        }
    }
    debug!("search worker stopped");
}

/// Load once; later calls return the resident dictionary.
fn load<'a>(
    loader: &DictionaryLoader,
    loaded: &'a mut Option<Loaded>,
) -> Result<&'a Loaded, WorkerError> {
    if loaded.is_none() {
        let dict = loader.load()?;
        *loaded = Some(Loaded {
            words: dict.words,
            frequencies: dict.frequencies,
        });
    }
    loaded.as_ref().ok_or(WorkerError::DictionaryNotReady)
}

fn search(loaded: Option<&Loaded>, query: &SearchQuery) -> Result<Vec<String>, WorkerError> {
    let dict = loaded.ok_or(WorkerError::DictionaryNotReady)?;
    Ok(MatchEngine::new(&dict.words).search(query)?)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use word_core::cache::{MemoryStore, TieredCache};
    use word_core::loader::{FetchError, RetryPolicy, TextSource, WordSource};
    use word_core::settings::Settings;

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);
    const WORDS: &str = "cat\nact\ntac\ncats\nscat\ncate\nbat\neat\ndog\n";

    struct CountingSource {
        text: Option<&'static str>,
        calls: AtomicU32,
    }

    impl CountingSource {
        fn new(text: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                text,
                calls: AtomicU32::new(0),
            })
        }
    }

    impl WordSource for CountingSource {
        fn fetch(&self) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text
                .map(str::to_string)
                .ok_or_else(|| FetchError::Http("connection refused".into()))
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    fn worker_over(source: Arc<dyn WordSource>) -> SearchWorker {
        let loader = DictionaryLoader::new(source, Box::new(MemoryStore::new()), &Settings::default())
            .with_retry_policy(RetryPolicy::immediate(2, TIMEOUT));
        SearchWorker::spawn(loader).unwrap()
    }

    fn worker() -> SearchWorker {
        worker_over(Arc::new(TextSource::new(WORDS)))
    }

    fn anagram(rack: &str) -> SearchQuery {
        SearchQuery::builder().letters(rack).build().unwrap()
    }

    fn expect_loaded(worker: &SearchWorker) -> Arc<WordSet> {
        match worker.recv_timeout(TIMEOUT) {
            Some(WorkerResponse::DictionaryLoaded { words, frequencies }) => {
                assert_eq!(words.len(), frequencies.len());
                words
            }
            other => panic!("expected DictionaryLoaded, got {other:?}"),
        }
    }

    #[test]
    fn test_search_before_load_is_not_ready() {
        let worker = worker();
        worker.search(anagram("TCA"), 7).unwrap();
        match worker.recv_timeout(TIMEOUT) {
            Some(WorkerResponse::Error {
                message,
                correlation_id,
            }) => {
                assert_eq!(correlation_id, Some(7));
                assert!(message.contains("not loaded"), "{message}");
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_then_search() {
        let worker = worker();
        worker.load_dictionary().unwrap();
        assert_eq!(expect_loaded(&worker).len(), 9);

        worker.search(anagram("CAT?"), 42).unwrap();
        match worker.recv_timeout(TIMEOUT) {
            Some(WorkerResponse::SearchResults {
                results,
                correlation_id,
            }) => {
                assert_eq!(correlation_id, 42);
                assert_eq!(results, ["CATE", "CATS", "SCAT"]);
            }
            other => panic!("expected SearchResults, got {other:?}"),
        }
    }

    #[test]
    fn test_load_is_idempotent() {
        let source = CountingSource::new(Some(WORDS));
        let worker = worker_over(source.clone());
        worker.load_dictionary().unwrap();
        worker.load_dictionary().unwrap();
        let first = expect_loaded(&worker);
        let second = expect_loaded(&worker);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_query_reports_error_with_id() {
        let worker = worker();
        worker.load_dictionary().unwrap();
        expect_loaded(&worker);

        let raw = SearchQuery {
            pattern: Some("C#T".into()),
            ..SearchQuery::default()
        };
        worker.search(raw, 3).unwrap();
        match worker.recv_timeout(TIMEOUT) {
            Some(WorkerResponse::Error {
                message,
                correlation_id,
            }) => {
                assert_eq!(correlation_id, Some(3));
                assert!(message.contains("invalid pattern character"), "{message}");
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_load_is_reported_and_retryable() {
        let source = CountingSource::new(None);
        let worker = worker_over(source.clone());
        worker.load_dictionary().unwrap();
        match worker.recv_timeout(TIMEOUT) {
            Some(WorkerResponse::Error {
                message,
                correlation_id,
            }) => {
                assert_eq!(correlation_id, None);
                assert!(message.contains("connection refused"), "{message}");
            }
            other => panic!("expected Error, got {other:?}"),
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        worker.search(anagram("TCA"), 1).unwrap();
        assert!(matches!(
            worker.recv_timeout(TIMEOUT),
            Some(WorkerResponse::Error {
                correlation_id: Some(1),
                ..
            })
        ));

        // A later load tries the source again.
        worker.load_dictionary().unwrap();
        assert!(matches!(
            worker.recv_timeout(TIMEOUT),
            Some(WorkerResponse::Error { .. })
        ));
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_responses_follow_request_order() {
        let worker = worker();
        worker.load_dictionary().unwrap();
        for id in 1..=5 {
            worker.search(anagram("TCA"), id).unwrap();
        }
        expect_loaded(&worker);
        for id in 1..=5 {
            match worker.recv_timeout(TIMEOUT) {
                Some(WorkerResponse::SearchResults {
                    results,
                    correlation_id,
                }) => {
                    assert_eq!(correlation_id, id);
                    assert_eq!(results, ["ACT", "CAT", "TAC"]);
                }
                other => panic!("expected SearchResults, got {other:?}"),
            }
        }
        assert!(worker.try_recv().is_none());
    }

    #[test]
    fn test_shared_across_threads() {
        let worker = Arc::new(worker());
        worker.load_dictionary().unwrap();
        expect_loaded(&worker);

        let senders: Vec<_> = (0..4u64)
            .map(|t| {
                let worker = Arc::clone(&worker);
                thread::spawn(move || {
                    for i in 0..5 {
                        worker.search(anagram("TCA"), t * 100 + i).unwrap();
                    }
                })
            })
            .collect();
        for s in senders {
            s.join().unwrap();
        }

        let mut ids: Vec<u64> = (0..20)
            .map(|_| match worker.recv_timeout(TIMEOUT) {
                Some(WorkerResponse::SearchResults { correlation_id, .. }) => correlation_id,
                other => panic!("expected SearchResults, got {other:?}"),
            })
            .collect();
        ids.sort_unstable();
        let expected: Vec<u64> = (0..4u64)
            .flat_map(|t| (0..5).map(move |i| t * 100 + i))
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_second_worker_loads_from_disk_cache() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default();
        let spawn = |source: Arc<dyn WordSource>| {
            let cache = TieredCache::in_dir(dir.path(), &settings.cache.key);
            let loader = DictionaryLoader::new(source, Box::new(cache), &settings)
                .with_retry_policy(RetryPolicy::immediate(1, TIMEOUT));
            SearchWorker::spawn(loader).unwrap()
        };

        let online: Arc<dyn WordSource> = Arc::new(TextSource::new(WORDS));
        let first = spawn(online);
        first.load_dictionary().unwrap();
        let words = expect_loaded(&first);
        drop(first);

        let offline = CountingSource::new(None);
        let source: Arc<dyn WordSource> = offline.clone();
        let second = spawn(source);
        second.load_dictionary().unwrap();
        assert_eq!(*expect_loaded(&second), *words);
        assert_eq!(offline.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_joins_thread() {
        let worker = worker();
        worker.load_dictionary().unwrap();
        drop(worker);
    }
}
