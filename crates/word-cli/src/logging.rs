//! Subscriber setup for `wordtool`.
//!
//! By default events go to stderr, human-readable. With `--trace-dir` they go
//! to a JSONL file instead, one event or closed span per line.

use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const TRACE_FILE: &str = "wordtool-trace.jsonl";

const STDERR_FILTER: &str = "word_core=warn";
const TRACE_FILTER: &str = "word_core=debug,word_cli=debug";

/// `RUST_LOG` when set, else `default`.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// A JSON subscriber appending to `<dir>/wordtool-trace.jsonl`.
///
/// Lines are written by a background thread; drop the guard to flush them.
pub fn json_subscriber(
    dir: &Path,
    filter: EnvFilter,
) -> Result<(impl Subscriber + Send + Sync + 'static, WorkerGuard), InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("wordtool-trace")
        .filename_suffix("jsonl")
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(writer)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(filter)
        .finish();
    Ok((subscriber, guard))
}

/// Install the process-wide subscriber. Hold the returned guard until exit.
pub fn init(trace_dir: Option<&Path>) -> Result<Option<WorkerGuard>, InitError> {
    match trace_dir {
        Some(dir) => {
            let (subscriber, guard) = json_subscriber(dir, env_filter(TRACE_FILTER))?;
            subscriber.init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter(STDERR_FILTER))
                .init();
            Ok(None)
        }
    }
}
