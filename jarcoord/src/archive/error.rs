//! Error types for archive inspection.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors that can occur while inspecting an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The file cannot be read or is not a valid zip container.
    #[error("Corrupt archive {}: {reason}", .path.display())]
    CorruptArchive { path: PathBuf, reason: String },

    /// The requested entry does not exist.
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// The entry exceeds the configured size ceiling.
    #[error("Entry {name} is too large: {size} bytes (max: {limit})")]
    EntryTooLarge { name: String, size: u64, limit: u64 },

    /// The entry exists but its content could not be read.
    #[error("Failed to read entry {name}: {source}")]
    EntryRead {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    /// Whether this error concerns the whole container rather than one entry.
    pub fn is_container_error(&self) -> bool {
        matches!(self, Self::CorruptArchive { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArchiveError::CorruptArchive {
            path: PathBuf::from("/tmp/broken.jar"),
            reason: "invalid Zip archive: Could not find central directory end".to_string(),
        };
        assert!(err.to_string().contains("/tmp/broken.jar"));
        assert!(err.to_string().contains("central directory"));
        assert!(err.is_container_error());
    }

    #[test]
    fn test_entry_errors_are_not_container_errors() {
        let err = ArchiveError::EntryNotFound("META-INF/MANIFEST.MF".to_string());
        assert_eq!(err.to_string(), "Entry not found: META-INF/MANIFEST.MF");
        assert!(!err.is_container_error());
    }
}
