//! Error types for the installer.

use std::io;
use std::path::PathBuf;

/// Result type for install operations.
pub type InstallResult<T> = Result<T, InstallError>;

/// Errors that can occur while installing an archive into a local repository.
#[derive(Debug)]
pub enum InstallError {
    /// A different archive is already installed under the same coordinate.
    Conflict { coordinate: String, target: PathBuf },

    /// Reading the archive or the repository failed, or Maven could not be started.
    Io { path: PathBuf, source: io::Error },

    /// Maven ran but reported failure.
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// No repository location is configured and no home directory exists.
    NoLocalRepository,
}

impl std::fmt::Display for InstallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict { coordinate, target } => {
                write!(
                    f,
                    "{} is already installed at {} with different content",
                    coordinate,
                    target.display()
                )
            }
            Self::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            Self::CommandFailed {
                command,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "'{}' exited with status {}", command, code)?,
                    None => write!(f, "'{}' was terminated by a signal", command)?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            Self::NoLocalRepository => {
                write!(f, "no local repository configured and no home directory found")
            }
        }
    }
}

impl std::error::Error for InstallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display() {
        let err = InstallError::Conflict {
            coordinate: "org.example:widget:jar:1.0".to_string(),
            target: PathBuf::from("/repo/org/example/widget/1.0/widget-1.0.jar"),
        };
        let message = err.to_string();
        assert!(message.contains("org.example:widget:jar:1.0"));
        assert!(message.contains("different content"));
    }

    #[test]
    fn test_command_failed_display() {
        let err = InstallError::CommandFailed {
            command: "mvn install:install-file".to_string(),
            status: Some(1),
            stderr: "BUILD FAILURE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'mvn install:install-file' exited with status 1: BUILD FAILURE"
        );
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err = InstallError::Io {
            path: PathBuf::from("/tmp/a.jar"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert!(InstallError::NoLocalRepository.source().is_none());
    }
}
