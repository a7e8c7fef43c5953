//! Output helpers shared across CLI commands.

use std::path::Path;

use console::style;
use jarcoord::coordinate::{Confidence, Field};
use jarcoord::resolver::{Provenance, Recovery, RecoveryError};

/// Render provenance as `group=layout artifact=path version=manifest`.
///
/// Packaging is only listed when it did not take the `jar` default.
pub fn format_provenance(provenance: &Provenance) -> String {
    let mut parts = vec![
        format!("group={}", provenance.group_id),
        format!("artifact={}", provenance.artifact_id),
        format!("version={}", provenance.version),
    ];
    if let Some(packaging) = provenance.get(Field::Packaging) {
        parts.push(format!("packaging={}", packaging));
    }
    parts.join(" ")
}

/// Whether any identifying field fell back to configured placeholders.
pub fn is_synthetic(provenance: &Provenance) -> bool {
    [provenance.group_id, provenance.artifact_id, provenance.version]
        .contains(&Confidence::FallbackSynthetic)
}

/// One line describing a recovered archive.
pub fn recovery_line(recovery: &Recovery) -> String {
    let coordinate = recovery.coordinate.to_string();
    let coordinate = if is_synthetic(&recovery.provenance) {
        style(coordinate).yellow().to_string()
    } else {
        style(coordinate).green().to_string()
    };
    format!(
        "{} -> {}  {}",
        recovery.path.display(),
        coordinate,
        style(format!("[{}]", format_provenance(&recovery.provenance))).dim()
    )
}

/// One line describing an archive that could not be processed.
pub fn failure_line(path: &Path, reason: &dyn std::fmt::Display) -> String {
    format!("{} -> {} {}", path.display(), style("failed:").red().bold(), reason)
}

/// Failure line for a recovery error.
pub fn recovery_failure_line(error: &RecoveryError) -> String {
    let RecoveryError::UnreadableArchive { path, reason } = error;
    failure_line(path, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provenance(packaging: Option<Confidence>) -> Provenance {
        Provenance {
            group_id: Confidence::PackageLayout,
            artifact_id: Confidence::PathConvention,
            version: Confidence::ManifestAttributes,
            packaging,
        }
    }

    #[test]
    fn test_format_provenance() {
        assert_eq!(
            format_provenance(&provenance(None)),
            "group=layout artifact=path version=manifest"
        );
        assert!(format_provenance(&provenance(Some(Confidence::EmbeddedDescriptor)))
            .ends_with("packaging=descriptor"));
    }

    #[test]
    fn test_is_synthetic() {
        assert!(!is_synthetic(&provenance(None)));
        let mut synthetic = provenance(None);
        synthetic.version = Confidence::FallbackSynthetic;
        assert!(is_synthetic(&synthetic));
    }
}
