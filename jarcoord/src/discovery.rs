//! Finding archives to process.
//!
//! Arguments may name archives directly or directories that are searched
//! recursively for `*.jar` files. Symlinks are followed, results are
//! deduplicated and keep the order in which they were found.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extension of the archives the tool handles.
pub const ARCHIVE_EXTENSION: &str = "jar";

/// Archives found for a set of input paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Archives in discovery order, without duplicates.
    pub archives: Vec<PathBuf>,
    /// Input paths that do not exist.
    pub missing: Vec<PathBuf>,
    /// Input files that are not archives.
    pub skipped: Vec<PathBuf>,
}

impl Discovery {
    /// Whether no archive was found.
    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }
}

/// Check whether a path has the archive extension, ignoring case.
pub fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(ARCHIVE_EXTENSION))
        .unwrap_or(false)
}

/// Expand input paths into the archives to process.
pub fn find_archives<P: AsRef<Path>>(paths: &[P]) -> Discovery {
    let mut discovery = Discovery::default();
    let mut seen = HashSet::new();

    let mut add = |discovery: &mut Discovery, path: PathBuf| {
        let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if seen.insert(key) {
            discovery.archives.push(path);
        }
    };

    for input in paths {
        let input = input.as_ref();

        if input.is_file() {
            if is_archive_path(input) {
                add(&mut discovery, input.to_path_buf());
            } else {
                debug!(path = %input.display(), "Not a jar, skipping");
                discovery.skipped.push(input.to_path_buf());
            }
            continue;
        }

        if !input.is_dir() {
            warn!(path = %input.display(), "Path does not exist");
            discovery.missing.push(input.to_path_buf());
            continue;
        }

        let walker = WalkDir::new(input)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && is_archive_path(entry.path()) {
                add(&mut discovery, entry.into_path());
            }
        }
    }

    if discovery.archives.is_empty() {
        warn!("No jars found");
    } else {
        info!("Found {} jars", discovery.archives.len());
    }
    discovery
}
