//! Strategy chain and coordinate resolution.
//!
//! The [`Resolver`] is the engine's entry point. For one archive it:
//!
//! 1. Opens the archive ([`ArchiveHandle`]), failing with
//!    [`RecoveryError::UnreadableArchive`] if that is impossible
//! 2. Runs every configured strategy in confidence order
//! 3. Merges the candidates per field, first plausible value winning
//! 4. Normalizes the merge into a [`FinalCoordinate`]
//!
//! Batches are processed on the rayon pool, one independent invocation per
//! archive.
//!
//! # Example
//!
//! ```no_run
//! use jarcoord::resolver::{RecoveryConfig, Resolver};
//!
//! let resolver = Resolver::new(RecoveryConfig::default());
//! let coordinate = resolver.recover_coordinate("libs/widget-2.3.1.jar")?;
//! println!("{}", coordinate);
//! # Ok::<(), jarcoord::resolver::RecoveryError>(())
//! ```

mod config;
mod error;

pub use config::{RecoveryConfig, DEFAULT_COMMONALITY_THRESHOLD, DEFAULT_SYNTHETIC_GROUP_PREFIX};
pub use error::{RecoveryError, RecoveryResult};

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::archive::ArchiveHandle;
use crate::coordinate::{Confidence, Field, FinalCoordinate, MergedCandidate, Normalizer};
use crate::strategy::Strategy;

/// Which tier supplied each field of a recovered coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub group_id: Confidence,
    pub artifact_id: Confidence,
    pub version: Confidence,
    /// `None` when packaging took the `jar` default.
    pub packaging: Option<Confidence>,
}

impl Provenance {
    /// Tier of a single field, `None` only for defaulted packaging.
    pub fn get(&self, field: Field) -> Option<Confidence> {
        match field {
            Field::GroupId => Some(self.group_id),
            Field::ArtifactId => Some(self.artifact_id),
            Field::Version => Some(self.version),
            Field::Packaging => self.packaging,
        }
    }
}

/// Outcome of recovering one archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recovery {
    pub path: PathBuf,
    pub coordinate: FinalCoordinate,
    pub provenance: Provenance,
}

/// One entry of a batch run.
#[derive(Debug)]
pub struct BatchItem {
    pub path: PathBuf,
    pub result: RecoveryResult<Recovery>,
}

/// Runs the strategy chain against archives.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: RecoveryConfig,
    chain: Vec<Strategy>,
    normalizer: Normalizer,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(RecoveryConfig::default())
    }
}

impl Resolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: RecoveryConfig) -> Self {
        let chain = config.chain();
        let normalizer = Normalizer::new(config.normalize.clone());
        Self {
            config,
            chain,
            normalizer,
        }
    }

    /// The configuration this resolver was built with.
    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    /// Strategies in the order they run.
    pub fn chain(&self) -> &[Strategy] {
        &self.chain
    }

    /// The normalizer applied to merged candidates.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Recover the coordinate of one archive.
    pub fn recover_coordinate(&self, path: impl AsRef<Path>) -> RecoveryResult<FinalCoordinate> {
        self.recover(path).map(|recovery| recovery.coordinate)
    }

    /// Recover the coordinate of one archive together with its provenance.
    pub fn recover(&self, path: impl AsRef<Path>) -> RecoveryResult<Recovery> {
        let path = path.as_ref();
        let mut archive = ArchiveHandle::open_with_limit(path, self.config.max_entry_bytes)
            .map_err(|e| RecoveryError::unreadable(path, e))?;
        Ok(self.recover_archive(&mut archive))
    }

    /// Run the chain against an already open archive. Never fails.
    pub fn recover_archive(&self, archive: &mut ArchiveHandle) -> Recovery {
        let mut merged = MergedCandidate::new();

        for strategy in &self.chain {
            let Some(candidate) = strategy.extract(archive, &self.config) else {
                trace!(path = %archive.path().display(), strategy = %strategy, "No candidate");
                continue;
            };
            let taken = merged.absorb(&candidate);
            trace!(
                path = %archive.path().display(),
                strategy = %strategy,
                fields = ?taken,
                "Absorbed candidate"
            );
        }

        let coordinate = self.normalizer.normalize(&merged);
        let provenance = self.provenance(&merged);

        debug!(
            path = %archive.path().display(),
            coordinate = %coordinate,
            group = %provenance.group_id,
            artifact = %provenance.artifact_id,
            version = %provenance.version,
            "Recovered coordinate"
        );

        Recovery {
            path: archive.path().to_path_buf(),
            coordinate,
            provenance,
        }
    }

    /// Recover a batch of archives in parallel.
    ///
    /// Results are in input order; one unreadable archive never affects the
    /// others.
    pub fn recover_all<P>(&self, paths: &[P]) -> Vec<BatchItem>
    where
        P: AsRef<Path> + Sync,
    {
        paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                BatchItem {
                    path: path.to_path_buf(),
                    result: self.recover(path),
                }
            })
            .collect()
    }

    /// Tier that effectively supplied each field.
    ///
    /// A merged value that sanitizes to nothing was replaced by a default,
    /// which counts as synthetic.
    fn provenance(&self, merged: &MergedCandidate) -> Provenance {
        let source = |field: Field| {
            merged
                .get(field)
                .filter(|sourced| !self.normalizer.sanitize(field, &sourced.value).is_empty())
                .map(|sourced| sourced.confidence)
        };

        Provenance {
            group_id: source(Field::GroupId).unwrap_or(Confidence::FallbackSynthetic),
            artifact_id: source(Field::ArtifactId).unwrap_or(Confidence::FallbackSynthetic),
            version: source(Field::Version).unwrap_or(Confidence::FallbackSynthetic),
            packaging: source(Field::Packaging),
        }
    }
}
