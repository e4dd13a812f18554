use std::fs::OpenOptions;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::QuizError;

pub const DEFAULT_LOG_FILE: &str = "quiz_debug.log";

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Route `tracing` output to `path`; the terminal belongs to the UI.
///
/// `RUST_LOG` overrides the `-v` derived level. Hold the returned guard for
/// the life of the process so buffered lines are flushed on exit. A second
/// call keeps the first subscriber.
pub fn init(path: &Path, verbosity: u8) -> Result<WorkerGuard, QuizError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }

    #[test]
    fn test_logger_init_twice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_LOG_FILE);
        let _first = init(&path, 1).unwrap();
        let _second = init(&path, 2).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_logger_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("quiz.log");
        assert!(matches!(init(&path, 0), Err(QuizError::Io(_))));
    }
}
