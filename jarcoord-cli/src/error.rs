//! CLI error type.

use jarcoord::config::ConfigError;
use jarcoord::install::InstallError;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded, changed or saved.
    Config(String),

    /// Logging could not be initialized.
    Logging(std::io::Error),

    /// The worker pool could not be created.
    ThreadPool(String),

    /// None of the given paths contained a jar.
    NoArchives,

    /// Some archives could not be recovered or installed.
    Incomplete { failed: usize, total: usize },

    /// A single install failed outside of a batch.
    Install(InstallError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "{}", msg),
            Self::Logging(e) => write!(f, "failed to initialize logging: {}", e),
            Self::ThreadPool(msg) => write!(f, "failed to create worker pool: {}", msg),
            Self::NoArchives => write!(f, "no jars found"),
            Self::Incomplete { failed, total } => {
                write!(f, "{} of {} jars failed", failed, total)
            }
            Self::Install(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Logging(e) => Some(e),
            Self::Install(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<InstallError> for CliError {
    fn from(e: InstallError) -> Self {
        Self::Install(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            CliError::Incomplete {
                failed: 2,
                total: 5
            }
            .to_string(),
            "2 of 5 jars failed"
        );
        let err: CliError = ConfigError::UnknownKey("a.b".to_string()).into();
        assert_eq!(err.to_string(), "Unknown configuration key 'a.b'");
    }
}
