//! SHA-256 checksums for detecting already-installed archives.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::error::{InstallError, InstallResult};

/// Buffer size for reading files during checksum calculation (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Calculate the lowercase hex SHA-256 of a file.
pub fn file_checksum(path: &Path) -> InstallResult<String> {
    let io_error = |source: std::io::Error| InstallError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_error)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(io_error)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Whether two files have identical content.
pub fn same_content(a: &Path, b: &Path) -> InstallResult<bool> {
    let a_len = std::fs::metadata(a)
        .map_err(|source| InstallError::Io {
            path: a.to_path_buf(),
            source,
        })?
        .len();
    let b_len = std::fs::metadata(b)
        .map_err(|source| InstallError::Io {
            path: b.to_path_buf(),
            source,
        })?
        .len();
    if a_len != b_len {
        return Ok(false);
    }
    Ok(file_checksum(a)? == file_checksum(b)?)
}
