//! Resolver error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;

/// Errors that can leave the recovery engine.
///
/// Missing or broken metadata never produces an error; the fallback strategy
/// guarantees a coordinate for every archive that can be opened.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// The archive could not be opened at all.
    #[error("Unreadable archive {}: {reason}", .path.display())]
    UnreadableArchive { path: PathBuf, reason: String },
}

impl RecoveryError {
    /// Path of the archive the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::UnreadableArchive { path, .. } => path,
        }
    }

    pub(super) fn unreadable(path: impl Into<PathBuf>, source: ArchiveError) -> Self {
        let reason = match source {
            ArchiveError::CorruptArchive { reason, .. } => reason,
            other => other.to_string(),
        };
        Self::UnreadableArchive {
            path: path.into(),
            reason,
        }
    }
}

/// Result type for recovery operations.
pub type RecoveryResult<T> = Result<T, RecoveryError>;
