//! `tracing` subscriber setup.
//!
//! The TUI owns the terminal, so it only logs when a file is given. The
//! `table` command logs to stderr. Verbosity follows `RUST_LOG`, default `warn`.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stderr,
    File(PathBuf),
}

pub fn init(target: &LogTarget) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(2, format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
    };
    // A subscriber may already be installed (tests, repeated calls); keep it.
    if let Err(e) = installed {
        tracing::debug!(error = %e, "tracing subscriber not installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_keeps_first_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fins.log");
        init(&LogTarget::File(path.clone())).unwrap();
        init(&LogTarget::Stderr).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = init(&LogTarget::File(dir.path().join("missing").join("fins.log"))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
