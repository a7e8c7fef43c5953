//! Manifest attribute strategy.
//!
//! Maps well-known `META-INF/MANIFEST.MF` main attributes onto coordinate
//! fields. Each field has a list of keys tried in order; the first value
//! that is plausible for the field wins, so an `Implementation-Vendor` of
//! "Acme Corporation" is skipped in favour of nothing at all.

use tracing::debug;

use crate::archive::{ArchiveHandle, Manifest, MANIFEST_PATH};
use crate::coordinate::{CandidateCoordinate, Confidence, Field};

/// How an attribute value is turned into a field value.
#[derive(Debug, Clone, Copy)]
enum Transform {
    AsIs,
    /// OSGi headers carry `;directive:=value` suffixes.
    StripDirectives,
    /// Java module names are dotted; the artifact is the last segment.
    LastSegment,
}

impl Transform {
    fn apply(self, value: &str) -> String {
        match self {
            Self::AsIs => value.trim().to_string(),
            Self::StripDirectives => value.split(';').next().unwrap_or(value).trim().to_string(),
            Self::LastSegment => value.rsplit('.').next().unwrap_or(value).trim().to_string(),
        }
    }
}

/// Attribute keys per field, highest priority first.
const KEY_TABLE: &[(Field, &[(&str, Transform)])] = &[
    (
        Field::GroupId,
        &[
            ("Implementation-Vendor-Id", Transform::AsIs),
            ("Implementation-Vendor", Transform::AsIs),
        ],
    ),
    (
        Field::ArtifactId,
        &[
            ("Implementation-Title", Transform::AsIs),
            ("Bundle-SymbolicName", Transform::StripDirectives),
            ("Extension-Name", Transform::AsIs),
            ("Specification-Title", Transform::AsIs),
            ("Automatic-Module-Name", Transform::LastSegment),
        ],
    ),
    (
        Field::Version,
        &[
            ("Implementation-Version", Transform::AsIs),
            ("Bundle-Version", Transform::AsIs),
            ("Specification-Version", Transform::AsIs),
        ],
    ),
];

pub(super) fn extract(archive: &mut ArchiveHandle) -> Option<CandidateCoordinate> {
    let (_, text) = archive.read_first_text(&[MANIFEST_PATH])?;
    let manifest = Manifest::parse(&text);
    let candidate = from_manifest(&manifest);

    debug!(
        path = %archive.path().display(),
        group = ?candidate.group_id(),
        artifact = ?candidate.artifact_id(),
        version = ?candidate.version(),
        "Manifest attributes"
    );
    Some(candidate)
}

fn from_manifest(manifest: &Manifest) -> CandidateCoordinate {
    let mut candidate = CandidateCoordinate::new(Confidence::ManifestAttributes);

    for (field, keys) in KEY_TABLE {
        let value = keys.iter().find_map(|(key, transform)| {
            manifest
                .get(key)
                .map(|raw| transform.apply(raw))
                .filter(|value| field.accepts(value))
        });
        let Some(value) = value else {
            continue;
        };
        candidate = match field {
            Field::GroupId => candidate.with_group_id(value),
            Field::ArtifactId => candidate.with_artifact_id(value),
            Field::Version => candidate.with_version(value),
            Field::Packaging => candidate,
        };
    }

    candidate
}
