use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Word lists larger than this are rejected rather than buffered.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Where the raw newline-delimited word list comes from.
pub trait WordSource: Send + Sync {
    fn fetch(&self) -> Result<String, FetchError>;

    /// Human-readable source name for logs.
    fn describe(&self) -> String;
}

/// Fetch the word list over HTTP(S).
pub struct HttpSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            url: url.into(),
            agent,
        }
    }
}

impl WordSource for HttpSource {
    fn fetch(&self) -> Result<String, FetchError> {
        let url = &self.url;
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| FetchError::Http(format!("{url}: {e}")))?;
        response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()
            .map_err(|e| FetchError::Http(format!("{url}: {e}")))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Read the word list from a local file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WordSource for FileSource {
    fn fetch(&self) -> Result<String, FetchError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory word list.
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl WordSource for TextSource {
    fn fetch(&self) -> Result<String, FetchError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("text ({} bytes)", self.text.len())
    }
}
