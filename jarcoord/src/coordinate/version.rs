//! Version token parsing for `name-version` file and directory names.
//!
//! Maven-style artifact files are named `{artifactId}-{version}.jar`, e.g.
//! `commons-lang3-3.12.0.jar` or `widget-1.0-SNAPSHOT.jar`. Because artifact
//! ids contain hyphens themselves, the split point is the last hyphen whose
//! remainder looks like a version:
//!
//! ```text
//! widget-1.0-SNAPSHOT
//!       ^ remainder "1.0-SNAPSHOT" is a version token
//!           ^ remainder "SNAPSHOT" is not
//! ```

use regex::Regex;
use std::sync::OnceLock;

/// Name and version recovered from a `name-version` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameVersion {
    /// Everything before the split hyphen (e.g., "commons-lang3")
    pub name: String,
    /// Everything after the split hyphen (e.g., "3.12.0")
    pub version: String,
}

/// Get the version token regex.
///
/// Pattern: `^\d+(\.\d+)*([.-][A-Za-z0-9]+)?$`
///
/// We accept:
/// - Dotted numeric versions: "1", "2.3.1", "10.0.0.4"
/// - One trailing qualifier: "1.0-SNAPSHOT", "2.0.RELEASE", "5.1.0.Final", "3.1-beta2"
fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d+)*([.-][A-Za-z0-9]+)?$").unwrap())
}

/// Check whether a token looks like a version.
///
/// # Examples
///
/// ```
/// use jarcoord::coordinate::is_version_token;
///
/// assert!(is_version_token("2.3.1"));
/// assert!(is_version_token("1.0-SNAPSHOT"));
/// assert!(!is_version_token("SNAPSHOT"));
/// assert!(!is_version_token("v2"));
/// ```
pub fn is_version_token(token: &str) -> bool {
    version_pattern().is_match(token)
}

/// Split a `name-version` string on the last hyphen that precedes a version token.
///
/// Returns `None` when no hyphen is followed by a version token, or when the
/// name part would be empty or purely numeric.
///
/// # Examples
///
/// ```
/// use jarcoord::coordinate::split_name_version;
///
/// let parsed = split_name_version("commons-lang3-3.12.0").unwrap();
/// assert_eq!(parsed.name, "commons-lang3");
/// assert_eq!(parsed.version, "3.12.0");
///
/// let parsed = split_name_version("widget-1.0-SNAPSHOT").unwrap();
/// assert_eq!(parsed.name, "widget");
/// assert_eq!(parsed.version, "1.0-SNAPSHOT");
///
/// assert!(split_name_version("mystery").is_none());
/// ```
pub fn split_name_version(stem: &str) -> Option<NameVersion> {
    let hyphens: Vec<usize> = stem.match_indices('-').map(|(pos, _)| pos).collect();

    for &pos in hyphens.iter().rev() {
        let name = &stem[..pos];
        let version = &stem[pos + 1..];

        if !is_version_token(version) {
            continue;
        }
        if !name.chars().any(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        return Some(NameVersion {
            name: name.to_string(),
            version: version.to_string(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_tokens() {
        for token in ["1", "2.3.1", "10.0.0.4", "1.0-SNAPSHOT", "5.1.0.Final", "3.1-beta2"] {
            assert!(is_version_token(token), "{} should be a version", token);
        }
        for token in ["", "SNAPSHOT", "v2", "1.", "1..2", "1.0-", "1.0-beta-2", "final"] {
            assert!(!is_version_token(token), "{} should not be a version", token);
        }
    }

    #[test]
    fn test_split_simple() {
        let parsed = split_name_version("widget-2.3.1").unwrap();
        assert_eq!(parsed.name, "widget");
        assert_eq!(parsed.version, "2.3.1");
    }

    #[test]
    fn test_split_hyphenated_name() {
        let parsed = split_name_version("jakarta-servlet-api-6.0.0").unwrap();
        assert_eq!(parsed.name, "jakarta-servlet-api");
        assert_eq!(parsed.version, "6.0.0");
    }

    #[test]
    fn test_split_prefers_last_hyphen() {
        // "2" alone is a version token, so the last hyphen wins.
        let parsed = split_name_version("lib-1.0-2").unwrap();
        assert_eq!(parsed.name, "lib-1.0");
        assert_eq!(parsed.version, "2");
    }

    #[test]
    fn test_split_qualifier() {
        let parsed = split_name_version("spring-core-5.3.9.RELEASE").unwrap();
        assert_eq!(parsed.name, "spring-core");
        assert_eq!(parsed.version, "5.3.9.RELEASE");
    }

    #[test]
    fn test_split_rejects_missing_version() {
        assert!(split_name_version("mystery").is_none());
        assert!(split_name_version("my-library").is_none());
        assert!(split_name_version("widget-").is_none());
    }

    #[test]
    fn test_split_rejects_numeric_name() {
        assert!(split_name_version("2024-1.0").is_none());
        assert!(split_name_version("-1.0").is_none());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_split_recovers_generated_parts(
                name in "[a-z][a-z0-9]{0,8}(-[a-z][a-z0-9]{0,8}){0,2}",
                version in "[0-9]{1,3}(\\.[0-9]{1,3}){0,3}",
            ) {
                let stem = format!("{}-{}", name, version);
                let parsed = split_name_version(&stem).unwrap();
                prop_assert_eq!(parsed.name, name);
                prop_assert_eq!(parsed.version, version);
            }

            #[test]
            fn test_split_never_panics(stem in "\\PC{0,40}") {
                let _ = split_name_version(&stem);
            }
        }
    }
}
