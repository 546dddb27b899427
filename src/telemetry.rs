//! Logging setup.
//!
//! The terminal UI owns stdout and stderr, so log lines only go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::QuizError;

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from an explicit directive, `RUST_LOG`, or the default.
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter, QuizError> {
    match level {
        Some(directive) => {
            EnvFilter::try_new(directive).map_err(|e| QuizError::Telemetry(e.to_string()))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install a file-backed subscriber. Returns `false` when no log file is set.
pub fn init(log_file: Option<&Path>, level: Option<&str>) -> Result<bool, QuizError> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let filter = build_filter(level)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| QuizError::Telemetry(e.to_string()))?;

    tracing::info!(path = %path.display(), "Logging initialised");
    Ok(true)
}

/// Initialize tracing for tests with a simple subscriber
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_installs_nothing() {
        assert!(!init(None, Some("debug")).unwrap());
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter(Some("quiz_session=debug")).is_ok());
        assert!(build_filter(None).is_ok());
    }
}
