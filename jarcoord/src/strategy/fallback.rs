//! Fallback synthetic strategy: placeholder values so the chain always
//! ends with a complete candidate.

use crate::archive::ArchiveHandle;
use crate::coordinate::{CandidateCoordinate, Confidence};
use crate::resolver::RecoveryConfig;

pub(super) fn extract(archive: &ArchiveHandle, config: &RecoveryConfig) -> CandidateCoordinate {
    let rules = &config.normalize;
    let stem = archive.file_stem();
    let artifact = if stem.trim().is_empty() {
        rules.default_artifact.clone()
    } else {
        stem
    };

    CandidateCoordinate::new(Confidence::FallbackSynthetic)
        .with_group_id(rules.default_group.clone())
        .with_artifact_id(artifact)
        .with_version(rules.placeholder_version.clone())
}
