//! Installer abstraction.

use std::path::{Path, PathBuf};

use super::error::InstallResult;
use crate::coordinate::FinalCoordinate;

/// What an install call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The archive was registered at `target`.
    Installed { target: PathBuf },
    /// An identical archive was already present at `target`; nothing ran.
    AlreadyPresent { target: PathBuf },
}

impl InstallOutcome {
    /// Where the archive lives in the local repository.
    pub fn target(&self) -> &Path {
        match self {
            Self::Installed { target } | Self::AlreadyPresent { target } => target,
        }
    }
}

/// Registers an archive under a coordinate in a local repository.
///
/// Implementations must be idempotent for identical coordinate and content.
pub trait Installer: Send + Sync {
    /// Install `archive` as `coordinate`.
    fn install(&self, archive: &Path, coordinate: &FinalCoordinate)
        -> InstallResult<InstallOutcome>;
}
