use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Bounded retries with linear backoff and a per-attempt timeout.
///
/// Attempt `n` (1-based) that fails is followed by a wait of
/// `n * base_delay`; no wait follows the last attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AttemptError<E> {
    #[error("{0}")]
    Failed(E),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("attempt aborted without a result")]
    Aborted,
    #[error("failed to spawn attempt: {0}")]
    Spawn(std::io::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("gave up after {attempts} attempt(s): {last}")]
pub struct RetryError<E> {
    pub attempts: u32,
    pub last: AttemptError<E>,
}

impl RetryPolicy {
    /// No waiting between attempts; handy for tests and local sources.
    pub fn immediate(max_attempts: u32, timeout: Duration) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            timeout,
        }
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Waits between consecutive attempts if every attempt fails.
    pub fn schedule(&self) -> Vec<Duration> {
        (1..self.max_attempts.max(1))
            .map(|attempt| self.backoff(attempt))
            .collect()
    }

    pub fn run<T, E, F>(&self, op: F) -> Result<T, RetryError<E>>
    where
        F: Fn(u32) -> Result<T, E> + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + std::fmt::Display + 'static,
    {
        self.run_with_sleep(op, thread::sleep)
    }

    /// Like [`RetryPolicy::run`] with an injectable sleep between attempts.
    pub fn run_with_sleep<T, E, F, S>(&self, op: F, mut sleep: S) -> Result<T, RetryError<E>>
    where
        F: Fn(u32) -> Result<T, E> + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + std::fmt::Display + 'static,
        S: FnMut(Duration),
    {
        let op = Arc::new(op);
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.attempt(&op, attempt) {
                Ok(value) => return Ok(value),
                Err(last) if attempt >= max_attempts => {
                    return Err(RetryError {
                        attempts: attempt,
                        last,
                    })
                }
                Err(e) => {
                    let wait = self.backoff(attempt);
                    tracing::warn!(attempt, max_attempts, ?wait, error = %e, "attempt failed");
                    sleep(wait);
                    attempt += 1;
                }
            }
        }
    }

    /// Race one attempt against the timeout. A timed-out attempt keeps
    /// running on its own thread; its result is dropped.
    fn attempt<T, E, F>(&self, op: &Arc<F>, attempt: u32) -> Result<T, AttemptError<E>>
    where
        F: Fn(u32) -> Result<T, E> + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let op = Arc::clone(op);
        thread::Builder::new()
            .name(format!("word-fetch-{attempt}"))
            .spawn(move || {
                let _ = tx.send(op(attempt));
            })
            .map_err(AttemptError::Spawn)?;

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AttemptError::Failed(e)),
            Err(RecvTimeoutError::Timeout) => Err(AttemptError::TimedOut(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(AttemptError::Aborted),
        }
    }
}
