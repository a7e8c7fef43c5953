//! Logging setup.
//!
//! Installs a `tracing` subscriber that writes human-readable lines to
//! stderr and, optionally, to a log file. `RUST_LOG` overrides the
//! verbosity chosen on the command line.

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Logging options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// 0 = info, 1 = debug, 2+ = trace.
    pub verbosity: u8,

    /// Also write logs (without colors) to this file.
    pub log_file: Option<PathBuf>,
}

impl LogSettings {
    /// Create settings with the given verbosity.
    pub fn new(verbosity: u8) -> Self {
        Self {
            verbosity,
            log_file: None,
        }
    }

    /// Write logs to a file as well.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Level for this crate's targets.
    pub fn level(&self) -> &'static str {
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> String {
        format!("warn,jarcoord={}", self.level())
    }
}

/// Keeps the background log file writer alive.
///
/// Dropping it flushes and stops file logging, so hold it until exit.
#[derive(Debug)]
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// Fails if the log file cannot be created or a subscriber is already set.
pub fn init_logging(settings: &LogSettings) -> io::Result<LogGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.default_directive()));

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(LocalTime::rfc_3339())
        .with_target(settings.verbosity > 0);

    let (file_layer, file_guard) = match &settings.log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339())
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

fn open_log_file(path: &Path) -> io::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LogSettings::new(0).level(), "info");
        assert_eq!(LogSettings::new(1).level(), "debug");
        assert_eq!(LogSettings::new(7).level(), "trace");
        assert_eq!(LogSettings::default().default_directive(), "warn,jarcoord=info");
    }

    #[test]
    fn test_open_log_file_creates_directories() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("logs").join("jarcoord.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
