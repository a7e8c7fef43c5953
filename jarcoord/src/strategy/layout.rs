//! Package layout strategy.
//!
//! Most libraries keep their classes below one root package that doubles as
//! their groupId (`org/apache/commons/lang3/...` -> `org.apache.commons.lang3`).
//! The deepest package holding a large enough share of the archive's classes
//! is taken as the groupId.

use std::collections::HashMap;

use tracing::debug;

use crate::archive::ArchiveHandle;
use crate::coordinate::{CandidateCoordinate, Confidence};
use crate::resolver::RecoveryConfig;

/// Prefixes under which application servers and Spring Boot nest classes.
const CLASS_ROOTS: [&str; 2] = ["BOOT-INF/classes/", "WEB-INF/classes/"];

/// A package must have at least this many segments to be used as a groupId.
const MIN_PACKAGE_DEPTH: usize = 2;

pub(super) fn extract(
    archive: &mut ArchiveHandle,
    config: &RecoveryConfig,
) -> Option<CandidateCoordinate> {
    let packages: Vec<Vec<&str>> = archive.file_entries().filter_map(class_package).collect();
    let package = dominant_package(&packages, config.commonality_threshold)?;

    debug!(
        path = %archive.path().display(),
        package = %package,
        classes = packages.len(),
        "Dominant package"
    );
    Some(CandidateCoordinate::new(Confidence::PackageLayout).with_group_id(package))
}

/// Package segments of a class entry, or `None` for entries that are not
/// ordinary classes. Classes in the default package yield an empty list.
fn class_package(entry: &str) -> Option<Vec<&str>> {
    let class_path = entry.strip_suffix(".class")?;
    if class_path.starts_with("META-INF/") {
        return None;
    }
    let class_path = CLASS_ROOTS
        .iter()
        .find_map(|root| class_path.strip_prefix(root))
        .unwrap_or(class_path);

    let mut segments: Vec<&str> = class_path.split('/').collect();
    let class_name = segments.pop()?;
    if class_name == "module-info" || class_name == "package-info" {
        return None;
    }
    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }
    Some(segments)
}

/// Find the deepest package prefix containing at least `threshold` of all
/// classes.
///
/// `packages` holds one segment list per class; classes in the default
/// package (empty list) count toward the total but never toward a prefix.
/// Only prefixes with at least two segments qualify. Among prefixes of the
/// same depth the one with more classes wins, then the lexicographically
/// smaller one.
///
/// # Examples
///
/// ```
/// use jarcoord::strategy::dominant_package;
///
/// let packages = vec![
///     vec!["com", "acme", "widget"],
///     vec!["com", "acme", "widget", "internal"],
///     vec!["com", "acme", "util"],
/// ];
/// assert_eq!(dominant_package(&packages, 0.6).as_deref(), Some("com.acme.widget"));
/// assert_eq!(dominant_package(&packages, 0.8).as_deref(), Some("com.acme"));
/// ```
pub fn dominant_package<S: AsRef<str>>(packages: &[Vec<S>], threshold: f64) -> Option<String> {
    let total = packages.len();
    if total == 0 {
        return None;
    }
    let required = ((threshold.clamp(0.0, 1.0) * total as f64).ceil() as usize).max(1);

    let mut counts: HashMap<Vec<&str>, usize> = HashMap::new();
    for package in packages {
        let segments: Vec<&str> = package.iter().map(|segment| segment.as_ref()).collect();
        for depth in MIN_PACKAGE_DEPTH..=segments.len() {
            *counts.entry(segments[..depth].to_vec()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count >= required)
        .max_by(|(a, a_count), (b, b_count)| {
            a.len()
                .cmp(&b.len())
                .then(a_count.cmp(b_count))
                .then_with(|| b.cmp(a))
        })
        .map(|(prefix, _)| prefix.join("."))
}
