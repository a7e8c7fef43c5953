//! Coordinate normalization.
//!
//! Turns a merged candidate into a [`FinalCoordinate`] that a Maven local
//! repository will accept. Normalization never fails: any input, however
//! degenerate, is coerced into a well-formed coordinate.
//!
//! Per field:
//! 1. trim surrounding whitespace
//! 2. replace characters outside the field's allowed set with the substitute
//! 3. lower-case (groupId and artifactId only when configured, packaging always)
//! 4. collapse runs of `.`
//! 5. trim leading/trailing `.`, `-` and `_`
//! 6. fall back to the configured default, then to a built-in constant
//!
//! The pipeline is idempotent: normalizing a normalized coordinate returns it
//! unchanged.

use tracing::warn;

use super::merge::MergedCandidate;
use super::types::{Field, FinalCoordinate, DEFAULT_PACKAGING};

/// Built-in groupId used when neither input nor configuration yields one.
pub const FALLBACK_GROUP_ID: &str = "local.unknown";

/// Built-in artifactId used when neither input nor configuration yields one.
pub const FALLBACK_ARTIFACT_ID: &str = "artifact";

/// Built-in version used when neither input nor configuration yields one.
pub const FALLBACK_VERSION: &str = "0.0.0-unknown";

/// Default replacement for disallowed characters.
pub const DEFAULT_SUBSTITUTE: char = '_';

/// Sanitization rules and default values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeRules {
    /// Replacement for characters outside the allowed set.
    ///
    /// Must be `_`, `-` or an ASCII letter/digit; anything else is replaced
    /// by [`DEFAULT_SUBSTITUTE`].
    pub substitute: char,

    /// Lower-case groupIds.
    ///
    /// Off by default. groupIds are case-sensitive in repository paths.
    pub lowercase_group: bool,

    /// Lower-case artifactIds.
    pub lowercase_artifact: bool,

    /// groupId used when the merged candidate has none that survives sanitizing.
    pub default_group: String,

    /// artifactId used when the merged candidate has none that survives sanitizing.
    pub default_artifact: String,

    /// Version used when the merged candidate has none that survives sanitizing.
    pub placeholder_version: String,
}

impl Default for NormalizeRules {
    fn default() -> Self {
        Self {
            substitute: DEFAULT_SUBSTITUTE,
            lowercase_group: false,
            lowercase_artifact: false,
            default_group: FALLBACK_GROUP_ID.to_string(),
            default_artifact: FALLBACK_ARTIFACT_ID.to_string(),
            placeholder_version: FALLBACK_VERSION.to_string(),
        }
    }
}

/// Check whether a character may appear in a field.
fn is_allowed(field: Field, c: char) -> bool {
    match field {
        Field::GroupId | Field::ArtifactId => {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
        }
        Field::Version => c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'),
        Field::Packaging => {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-')
        }
    }
}

/// Check a value against repository identifier rules.
///
/// Valid values are non-empty, use only the field's allowed characters
/// (which excludes path separators and whitespace), contain no `..` and do
/// not start or end with `.`.
///
/// # Examples
///
/// ```
/// use jarcoord::coordinate::{is_valid_identifier, Field};
///
/// assert!(is_valid_identifier(Field::GroupId, "org.example"));
/// assert!(is_valid_identifier(Field::Version, "1.0.0+build.5"));
/// assert!(!is_valid_identifier(Field::GroupId, "org/example"));
/// assert!(!is_valid_identifier(Field::ArtifactId, ""));
/// assert!(!is_valid_identifier(Field::Packaging, "JAR"));
/// ```
pub fn is_valid_identifier(field: Field, value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| is_allowed(field, c))
        && !value.contains("..")
        && !value.starts_with('.')
        && !value.ends_with('.')
}

/// Validates and repairs candidates into final coordinates.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: NormalizeRules,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeRules::default())
    }
}

impl Normalizer {
    /// Create a normalizer, repairing an unusable substitute character.
    pub fn new(mut rules: NormalizeRules) -> Self {
        let substitute = rules.substitute;
        if !(substitute.is_ascii_alphanumeric() || substitute == '_' || substitute == '-') {
            warn!(
                substitute = %substitute,
                "Unusable substitute character, using '{}'",
                DEFAULT_SUBSTITUTE
            );
            rules.substitute = DEFAULT_SUBSTITUTE;
        }
        Self { rules }
    }

    /// The active rules.
    pub fn rules(&self) -> &NormalizeRules {
        &self.rules
    }

    /// Normalize a merged candidate.
    pub fn normalize(&self, merged: &MergedCandidate) -> FinalCoordinate {
        self.normalize_fields(
            merged.value(Field::GroupId),
            merged.value(Field::ArtifactId),
            merged.value(Field::Version),
            merged.value(Field::Packaging),
        )
    }

    /// Normalize an existing final coordinate again.
    ///
    /// Returns an equal coordinate when it was produced by a normalizer with
    /// the same rules.
    pub fn renormalize(&self, coordinate: &FinalCoordinate) -> FinalCoordinate {
        self.normalize_fields(
            Some(coordinate.group_id()),
            Some(coordinate.artifact_id()),
            Some(coordinate.version()),
            Some(coordinate.packaging()),
        )
    }

    fn normalize_fields(
        &self,
        group_id: Option<&str>,
        artifact_id: Option<&str>,
        version: Option<&str>,
        packaging: Option<&str>,
    ) -> FinalCoordinate {
        let rules = &self.rules;
        FinalCoordinate {
            group_id: self.field(
                Field::GroupId,
                group_id,
                &rules.default_group,
                FALLBACK_GROUP_ID,
            ),
            artifact_id: self.field(
                Field::ArtifactId,
                artifact_id,
                &rules.default_artifact,
                FALLBACK_ARTIFACT_ID,
            ),
            version: self.field(
                Field::Version,
                version,
                &rules.placeholder_version,
                FALLBACK_VERSION,
            ),
            packaging: self.field(
                Field::Packaging,
                packaging,
                DEFAULT_PACKAGING,
                DEFAULT_PACKAGING,
            ),
        }
    }

    /// Sanitize a value, falling back to the configured default and then to
    /// the built-in constant.
    fn field(&self, field: Field, value: Option<&str>, default: &str, builtin: &str) -> String {
        [value.unwrap_or(""), default, builtin]
            .into_iter()
            .map(|candidate| self.sanitize(field, candidate))
            .find(|sanitized| !sanitized.is_empty())
            .unwrap_or_else(|| builtin.to_string())
    }

    /// Apply the sanitizing pipeline to one value.
    pub fn sanitize(&self, field: Field, value: &str) -> String {
        let lowercase = match field {
            Field::GroupId => self.rules.lowercase_group,
            Field::ArtifactId => self.rules.lowercase_artifact,
            Field::Version => false,
            Field::Packaging => true,
        };

        let mut out = String::with_capacity(value.len());
        for c in value.trim().chars() {
            let c = if lowercase { c.to_ascii_lowercase() } else { c };
            let c = if is_allowed(field, c) {
                c
            } else if lowercase {
                self.rules.substitute.to_ascii_lowercase()
            } else {
                self.rules.substitute
            };
            // Collapse runs of dots
            if c == '.' && out.ends_with('.') {
                continue;
            }
            out.push(c);
        }

        out.trim_matches(|c| matches!(c, '.' | '-' | '_')).to_string()
    }
}
