//! Core coordinate types: confidence tiers, candidates and final coordinates.

use std::fmt;

use serde::Serialize;

/// Packaging assumed when no embedded descriptor declares one.
pub const DEFAULT_PACKAGING: &str = "jar";

/// How trustworthy a strategy's output is relative to the others.
///
/// Variants are declared from most to least trustworthy, so the derived
/// `Ord` sorts the best tier first (`EmbeddedDescriptor < FallbackSynthetic`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Tool-authored descriptor bundled under `META-INF/maven/`.
    EmbeddedDescriptor,
    /// `META-INF/MANIFEST.MF` main attributes.
    ManifestAttributes,
    /// Dominant package directory of the archive's classes.
    PackageLayout,
    /// `name-version` pattern in the file or parent directory name.
    PathConvention,
    /// Cleaned-up file stem without a version token.
    FilenameHeuristic,
    /// Configured placeholders. Always available.
    FallbackSynthetic,
}

impl Confidence {
    /// All tiers, best first.
    pub const ALL: [Confidence; 6] = [
        Confidence::EmbeddedDescriptor,
        Confidence::ManifestAttributes,
        Confidence::PackageLayout,
        Confidence::PathConvention,
        Confidence::FilenameHeuristic,
        Confidence::FallbackSynthetic,
    ];

    /// Short label used in logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmbeddedDescriptor => "descriptor",
            Self::ManifestAttributes => "manifest",
            Self::PackageLayout => "layout",
            Self::PathConvention => "path",
            Self::FilenameHeuristic => "filename",
            Self::FallbackSynthetic => "fallback",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the four coordinate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    GroupId,
    ArtifactId,
    Version,
    Packaging,
}

impl Field {
    /// Maven property name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GroupId => "groupId",
            Self::ArtifactId => "artifactId",
            Self::Version => "version",
            Self::Packaging => "packaging",
        }
    }

    /// Whether a raw value is a plausible guess for this field.
    ///
    /// Identifiers must contain a letter, versions a digit, and none of them
    /// may contain whitespace. Values failing this are treated as if the
    /// strategy had not supplied them.
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return false;
        }
        match self {
            Self::GroupId | Self::ArtifactId | Self::Packaging => {
                value.chars().any(|c| c.is_ascii_alphabetic())
            }
            Self::Version => value.chars().any(|c| c.is_ascii_digit()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A partially or fully filled coordinate produced by one strategy.
///
/// Immutable once built: fields are private and the `with_*` builders
/// consume the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCoordinate {
    confidence: Confidence,
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    packaging: Option<String>,
}

impl CandidateCoordinate {
    /// Create an empty candidate for the given tier.
    pub fn new(confidence: Confidence) -> Self {
        Self {
            confidence,
            group_id: None,
            artifact_id: None,
            version: None,
            packaging: None,
        }
    }

    /// Set the groupId. Blank values are ignored.
    pub fn with_group_id(mut self, value: impl Into<String>) -> Self {
        self.group_id = non_blank(value.into());
        self
    }

    /// Set the artifactId. Blank values are ignored.
    pub fn with_artifact_id(mut self, value: impl Into<String>) -> Self {
        self.artifact_id = non_blank(value.into());
        self
    }

    /// Set the version. Blank values are ignored.
    pub fn with_version(mut self, value: impl Into<String>) -> Self {
        self.version = non_blank(value.into());
        self
    }

    /// Declare an explicit packaging. Blank values are ignored.
    pub fn with_packaging(mut self, value: impl Into<String>) -> Self {
        self.packaging = non_blank(value.into());
        self
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn artifact_id(&self) -> Option<&str> {
        self.artifact_id.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Packaging explicitly declared by the strategy, if any.
    pub fn declared_packaging(&self) -> Option<&str> {
        self.packaging.as_deref()
    }

    /// Effective packaging: the declared one or [`DEFAULT_PACKAGING`].
    pub fn packaging(&self) -> &str {
        self.packaging.as_deref().unwrap_or(DEFAULT_PACKAGING)
    }

    /// Value of a single field.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::GroupId => self.group_id(),
            Field::ArtifactId => self.artifact_id(),
            Field::Version => self.version(),
            Field::Packaging => self.declared_packaging(),
        }
    }

    /// True when no field was filled.
    pub fn is_empty(&self) -> bool {
        self.group_id.is_none()
            && self.artifact_id.is_none()
            && self.version.is_none()
            && self.packaging.is_none()
    }

    /// True when groupId, artifactId and version are all present.
    pub fn is_complete(&self) -> bool {
        self.group_id.is_some() && self.artifact_id.is_some() && self.version.is_some()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// A fully specified, syntactically valid coordinate.
///
/// Only the [`Normalizer`](super::Normalizer) creates these, which is what
/// guarantees every field is non-empty and passes
/// [`is_valid_identifier`](super::is_valid_identifier).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalCoordinate {
    pub(super) group_id: String,
    pub(super) artifact_id: String,
    pub(super) version: String,
    pub(super) packaging: String,
}

impl FinalCoordinate {
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    /// Value of a single field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::GroupId => &self.group_id,
            Field::ArtifactId => &self.artifact_id,
            Field::Version => &self.version,
            Field::Packaging => &self.packaging,
        }
    }

    /// File name Maven uses for the main artifact, e.g. `widget-2.3.1.jar`.
    pub fn artifact_filename(&self) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, self.packaging)
    }
}

/// Renders `groupId:artifactId:packaging:version`.
impl fmt::Display for FinalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.packaging, self.version
        )
    }
}
