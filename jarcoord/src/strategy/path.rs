//! Path convention strategy.
//!
//! Recovers artifactId and version from a `name-version` file stem, or from
//! the parent directory when the archive sits in a directory named after a
//! library release:
//!
//! ```text
//! libs/widget-2.3.1.jar        -> widget : 2.3.1,  group local.libs
//! vendor/sdk-4.0/sdk.jar       -> sdk    : 4.0,    group local.sdk
//! ```
//!
//! The groupId is a synthetic placeholder built from the parent directory.

use tracing::debug;

use crate::archive::ArchiveHandle;
use crate::coordinate::{split_name_version, CandidateCoordinate, Confidence, NameVersion};
use crate::resolver::RecoveryConfig;

pub(super) fn extract(
    archive: &mut ArchiveHandle,
    config: &RecoveryConfig,
) -> Option<CandidateCoordinate> {
    let stem = archive.file_stem();
    let parent = archive.parent_dir_name();
    let candidate = from_names(&stem, parent.as_deref(), &config.synthetic_group_prefix)?;

    debug!(
        path = %archive.path().display(),
        artifact = ?candidate.artifact_id(),
        version = ?candidate.version(),
        group = ?candidate.group_id(),
        "Path convention"
    );
    Some(candidate)
}

fn from_names(stem: &str, parent: Option<&str>, prefix: &str) -> Option<CandidateCoordinate> {
    let (artifact, version, group_token) = if let Some(NameVersion { name, version }) =
        split_name_version(stem)
    {
        (name, version, parent.map(str::to_string))
    } else {
        let NameVersion { name, version } = parent.and_then(split_name_version)?;
        // A plain stem ("sdk") names the artifact better than the directory.
        let artifact = if stem.chars().any(|c| c.is_ascii_alphabetic()) {
            stem.to_string()
        } else {
            name.clone()
        };
        (artifact, version, Some(name))
    };

    let mut candidate = CandidateCoordinate::new(Confidence::PathConvention)
        .with_artifact_id(artifact)
        .with_version(version);
    if let Some(token) = group_token {
        candidate = candidate.with_group_id(synthetic_group(prefix, &token));
    }
    Some(candidate)
}

/// Build `<prefix>.<directory>` with whitespace replaced by hyphens.
fn synthetic_group(prefix: &str, directory: &str) -> String {
    let token: String = directory
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    let prefix = prefix.trim().trim_end_matches('.');
    if prefix.is_empty() {
        token
    } else {
        format!("{}.{}", prefix, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::archive;
    use tempfile::TempDir;

    #[test]
    fn test_name_version_stem() {
        let candidate = from_names("widget-2.3.1", Some("libs"), "local").unwrap();
        assert_eq!(candidate.artifact_id(), Some("widget"));
        assert_eq!(candidate.version(), Some("2.3.1"));
        assert_eq!(candidate.group_id(), Some("local.libs"));
        assert_eq!(candidate.confidence(), Confidence::PathConvention);
    }

    #[test]
    fn test_parent_directory_release() {
        let candidate = from_names("sdk", Some("sdk-4.0"), "local").unwrap();
        assert_eq!(candidate.artifact_id(), Some("sdk"));
        assert_eq!(candidate.version(), Some("4.0"));
        assert_eq!(candidate.group_id(), Some("local.sdk"));

        let candidate = from_names("1234", Some("vendor-sdk-4.0.1"), "local").unwrap();
        assert_eq!(candidate.artifact_id(), Some("vendor-sdk"));
        assert_eq!(candidate.group_id(), Some("local.vendor-sdk"));
    }

    #[test]
    fn test_no_version_anywhere() {
        assert!(from_names("mystery", Some("libs"), "local").is_none());
        assert!(from_names("mystery", None, "local").is_none());
    }

    #[test]
    fn test_without_parent_directory() {
        let candidate = from_names("widget-1.0-SNAPSHOT", None, "local").unwrap();
        assert_eq!(candidate.version(), Some("1.0-SNAPSHOT"));
        assert_eq!(candidate.group_id(), None);
    }

    #[test]
    fn test_synthetic_group() {
        assert_eq!(synthetic_group("local", "vendor libs"), "local.vendor-libs");
        assert_eq!(synthetic_group("local.", "libs"), "local.libs");
        assert_eq!(synthetic_group("", "libs"), "libs");
    }

    #[test]
    fn test_extract_from_archive() {
        let dir = TempDir::new().unwrap();
        let mut handle = archive(dir.path(), "thirdparty/widget-2.3.1.jar", &[("a.txt", "x")]);
        let candidate = extract(&mut handle, &RecoveryConfig::default()).unwrap();
        assert_eq!(candidate.artifact_id(), Some("widget"));
        assert_eq!(candidate.version(), Some("2.3.1"));
        assert_eq!(candidate.group_id(), Some("local.thirdparty"));
    }
}
