//! Filename heuristic strategy.
//!
//! For stems without a proper version token, strips build-tool noise
//! (`-all`, `-shaded`, `-jar-with-dependencies`, `_v2`, ...) from the end
//! and keeps the rest as artifactId. Never produces a version.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::archive::ArchiveHandle;
use crate::coordinate::{CandidateCoordinate, Confidence};

/// Tokens that describe how an archive was packaged, not what it is.
const NOISE_TOKENS: &[&str] = &[
    "all",
    "bin",
    "deps",
    "dependencies",
    "dist",
    "fat",
    "final",
    "full",
    "jar",
    "latest",
    "nodeps",
    "release",
    "shaded",
    "snapshot",
    "standalone",
    "uber",
    "with",
];

/// Version-ish tokens such as `2`, `v2`, `r5`, `10b`.
fn versionish_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^[vr]?\d+[a-z0-9]*$").unwrap())
}

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_' | '.' | ' ')
}

fn is_noise(token: &str) -> bool {
    NOISE_TOKENS.iter().any(|noise| noise.eq_ignore_ascii_case(token))
        || versionish_pattern().is_match(token)
}

/// Strip trailing noise tokens from a file stem.
///
/// Tokens are separated by `-`, `_`, `.` or spaces. The first token is
/// always kept, and the original separators of the kept part are preserved.
///
/// # Examples
///
/// ```
/// use jarcoord::strategy::strip_noise_suffixes;
///
/// assert_eq!(strip_noise_suffixes("reporting-engine-jar-with-dependencies"), "reporting-engine");
/// assert_eq!(strip_noise_suffixes("acme_client_v2_final"), "acme_client");
/// assert_eq!(strip_noise_suffixes("bin"), "bin");
/// ```
pub fn strip_noise_suffixes(stem: &str) -> &str {
    let mut kept = stem.trim_matches(is_separator);

    loop {
        let Some(split) = kept.rfind(is_separator) else {
            return kept;
        };
        let last = &kept[split + 1..];
        if !is_noise(last) {
            return kept;
        }
        let rest = kept[..split].trim_end_matches(is_separator);
        if rest.is_empty() {
            return kept;
        }
        kept = rest;
    }
}

pub(super) fn extract(archive: &mut ArchiveHandle) -> Option<CandidateCoordinate> {
    let stem = archive.file_stem();
    let artifact = strip_noise_suffixes(&stem);
    if !artifact.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    debug!(path = %archive.path().display(), artifact, "Filename heuristic");
    Some(CandidateCoordinate::new(Confidence::FilenameHeuristic).with_artifact_id(artifact))
}
