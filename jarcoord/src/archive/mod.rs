//! Archive inspection without extraction.
//!
//! [`ArchiveHandle`] exposes the entry listing and entry contents of a
//! zip-format archive (`.jar`, `.war`, `.zip`) straight from its central
//! directory. [`Manifest`] parses `META-INF/MANIFEST.MF`.

mod error;
mod handle;
mod manifest;

pub use error::{ArchiveError, ArchiveResult};
pub use handle::{ArchiveHandle, DEFAULT_MAX_ENTRY_BYTES};
pub use manifest::{Manifest, MANIFEST_PATH};
