//! In-memory access to zip-format archives.
//!
//! Entries are read straight from the archive's central directory into
//! memory. Nothing is ever extracted to disk, so probing dozens of entries
//! across dozens of archives costs only the bytes actually read.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::trace;
use zip::result::ZipError;
use zip::ZipArchive;

use super::error::{ArchiveError, ArchiveResult};

/// Default ceiling for a single entry read (4 MiB).
///
/// Descriptors and manifests are a few kilobytes; anything near this size is
/// not metadata.
pub const DEFAULT_MAX_ENTRY_BYTES: u64 = 4 * 1024 * 1024;

/// Upper bound on the buffer reserved up front for one entry.
const MAX_PREALLOCATION: u64 = 64 * 1024;

/// An open, read-only view of one archive.
///
/// The underlying file is closed when the handle is dropped.
pub struct ArchiveHandle {
    path: PathBuf,
    zip: ZipArchive<BufReader<File>>,
    /// Entry names in central directory order.
    names: Vec<String>,
    max_entry_bytes: u64,
}

impl std::fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("path", &self.path)
            .field("entries", &self.zip.len())
            .field("max_entry_bytes", &self.max_entry_bytes)
            .finish()
    }
}

impl ArchiveHandle {
    /// Open an archive with the default entry size ceiling.
    pub fn open(path: impl AsRef<Path>) -> ArchiveResult<Self> {
        Self::open_with_limit(path, DEFAULT_MAX_ENTRY_BYTES)
    }

    /// Open an archive, capping single entry reads at `max_entry_bytes`.
    pub fn open_with_limit(path: impl AsRef<Path>, max_entry_bytes: u64) -> ArchiveResult<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| ArchiveError::CorruptArchive {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let corrupt = |e: ZipError| ArchiveError::CorruptArchive {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut zip = ZipArchive::new(BufReader::new(file)).map_err(corrupt)?;
        let names = (0..zip.len())
            .map(|index| zip.by_index_raw(index).map(|entry| entry.name().to_string()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(corrupt)?;

        trace!(path = %path.display(), entries = zip.len(), "Opened archive");

        Ok(Self {
            path: path.to_path_buf(),
            zip,
            names,
            max_entry_bytes: max_entry_bytes.max(1),
        })
    }

    /// Path the archive was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its extension (e.g., "widget-2.3.1").
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Name of the directory containing the archive, if it has one.
    pub fn parent_dir_name(&self) -> Option<String> {
        self.path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.is_empty())
    }

    /// Number of entries, including directory entries.
    pub fn len(&self) -> usize {
        self.zip.len()
    }

    /// Whether the archive has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.zip.len() == 0
    }

    /// Iterate over entry names.
    ///
    /// Each call starts a fresh pass in the order entries appear in the
    /// central directory.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Iterate over file entry names, skipping directory entries.
    pub fn file_entries(&self) -> impl Iterator<Item = &str> {
        self.entries().filter(|name| !name.ends_with('/'))
    }

    /// Check whether an entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries().any(|entry| entry == name)
    }

    /// Read the bytes of one entry.
    pub fn read_entry(&mut self, name: &str) -> ArchiveResult<Vec<u8>> {
        let limit = self.max_entry_bytes;

        let entry = match self.zip.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(ArchiveError::EntryNotFound(name.to_string()))
            }
            Err(ZipError::Io(source)) => {
                return Err(ArchiveError::EntryRead {
                    name: name.to_string(),
                    source,
                })
            }
            Err(e) => {
                return Err(ArchiveError::EntryRead {
                    name: name.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()),
                })
            }
        };

        let declared = entry.size();
        if declared > limit {
            return Err(ArchiveError::EntryTooLarge {
                name: name.to_string(),
                size: declared,
                limit,
            });
        }

        // The declared size comes from the archive itself; never trust it
        // for the allocation bound.
        let mut buffer = Vec::with_capacity(declared.min(MAX_PREALLOCATION) as usize);
        entry
            .take(limit.saturating_add(1))
            .read_to_end(&mut buffer)
            .map_err(|source| ArchiveError::EntryRead {
                name: name.to_string(),
                source,
            })?;

        if buffer.len() as u64 > limit {
            return Err(ArchiveError::EntryTooLarge {
                name: name.to_string(),
                size: buffer.len() as u64,
                limit,
            });
        }

        trace!(
            path = %self.path.display(),
            entry = name,
            bytes = buffer.len(),
            "Read archive entry"
        );

        Ok(buffer)
    }

    /// Read an entry as text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected and a leading byte
    /// order mark is dropped.
    pub fn read_entry_text(&mut self, name: &str) -> ArchiveResult<String> {
        let bytes = self.read_entry(name)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
    }

    /// Read the first existing entry among `names`, matching case-insensitively.
    ///
    /// Returns the actual entry name together with its text, or `None` when
    /// no name matches or the entry cannot be read.
    pub fn read_first_text(&mut self, names: &[&str]) -> Option<(String, String)> {
        let found = names.iter().find_map(|wanted| {
            self.entries()
                .find(|entry| entry.eq_ignore_ascii_case(wanted))
                .map(str::to_string)
        })?;

        match self.read_entry_text(&found) {
            Ok(text) => Some((found, text)),
            Err(e) => {
                trace!(path = %self.path.display(), error = %e, "Unreadable entry");
                None
            }
        }
    }
}
