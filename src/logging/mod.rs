//! Tracing subscriber initialization.
//!
//! The gate itself only emits `tracing` events; embedders with their own
//! subscriber need nothing from this module. For the demo and for apps
//! without one, `init` wires a file-backed subscriber so gate transitions
//! can be followed with `tail -f` next to a fullscreen TUI.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create the log directory.
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The log path has no usable file name component.
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// A global subscriber is already installed.
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize a file-backed tracing subscriber.
///
/// Creates the parent directory if needed. Respects `RUST_LOG`, defaulting
/// to `info`. Fails with [`LoggingError::SubscriberAlreadySet`] when the
/// embedder installed a subscriber first.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // No ANSI colors in log files.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let test_dir = std::env::temp_dir().join("lazygate_test_logs_create");
        let log_file = test_dir.join("gate.log");

        let _ = fs::remove_dir_all(&test_dir);

        // The global subscriber may already be set by a sibling test; the
        // directory must be created either way.
        let _ = init(&log_file);

        assert!(
            test_dir.exists(),
            "Log directory should be created: {:?}",
            test_dir
        );

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn init_succeeds_when_directory_already_exists() {
        let test_dir = std::env::temp_dir().join("lazygate_test_logs_exists");
        let log_file = test_dir.join("gate.log");

        let _ = fs::create_dir_all(&test_dir);

        let _ = init(&log_file);

        assert!(test_dir.exists(), "Log directory should exist: {:?}", test_dir);

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let test_dir = std::env::temp_dir().join("lazygate_test_logs_twice");
        let first = init(&test_dir.join("a.log"));
        let second = init(&test_dir.join("b.log"));

        // Whichever call lost the race (possibly to another test binary's
        // subscriber), the second of this pair must fail.
        if first.is_ok() {
            assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));
        } else {
            assert!(matches!(first, Err(LoggingError::SubscriberAlreadySet)));
        }

        let _ = fs::remove_dir_all(&test_dir);
    }
}
