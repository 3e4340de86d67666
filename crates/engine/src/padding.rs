// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Volume padding: a large random file bundled into every artifact of a
//! session to inflate its size.
//!
//! The file is created once per session and shared by all of that session's
//! jobs through an `Arc<PaddingFile>`. Each holder calls
//! [`PaddingFile::release`] when done; only the final release deletes the
//! file, so no job loses it while its packaging run is still reading it.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub const PADDING_FILE_NAME: &str = "dummy_data.bin";
pub const DEFAULT_PADDING_MB: u64 = 300;

const MIB: u64 = 1024 * 1024;
/// Bytes written per chunk; bounds memory use regardless of total size
pub const CHUNK_SIZE: usize = MIB as usize;

#[derive(Debug, Error)]
pub enum PaddingError {
    #[error("cannot create padding file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write padding file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no random source for padding: {0}")]
    Random(String),
    #[error("padding file {} is {actual} bytes, expected at least {expected}", path.display())]
    Truncated { path: PathBuf, expected: u64, actual: u64 },
}

/// An on-disk padding file that was fully written and verified.
#[derive(Debug)]
pub struct PaddingFile {
    path: PathBuf,
    size: u64,
}

impl PaddingFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Give up one shared handle. The last holder deletes the file.
    ///
    /// Returns the deleted path when this call removed it, `None` while
    /// other holders remain.
    pub fn release(self: Arc<Self>) -> std::io::Result<Option<PathBuf>> {
        let Some(file) = Arc::into_inner(self) else {
            return Ok(None);
        };
        let path = file.path.clone();
        remove_padding_file(&path)?;
        Ok(Some(path))
    }
}

impl Drop for PaddingFile {
    fn drop(&mut self) {
        // Covers handles dropped without release (a job task that panicked)
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Write `size_mb` MiB of random bytes to `path` in [`CHUNK_SIZE`] chunks.
///
/// The result is verified on disk; a short file is an error, never a
/// success. On any failure the partial file is removed.
pub fn create_padding_file(path: &Path, size_mb: u64) -> Result<PaddingFile, PaddingError> {
    let expected = size_mb.saturating_mul(MIB);
    tracing::info!(path = %path.display(), size_mb, "creating padding file");

    let result = write_random(path, size_mb).and_then(|()| verify(path, expected));
    match result {
        Ok(size) => Ok(PaddingFile { path: path.to_path_buf(), size }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "padding file creation failed");
            let _ = remove_padding_file(path);
            Err(e)
        }
    }
}

/// Delete the padding file. A missing file is not an error.
///
/// Returns whether a file was actually removed.
pub fn remove_padding_file(path: &Path) -> std::io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed padding file");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn write_random(path: &Path, size_mb: u64) -> Result<(), PaddingError> {
    let write_err = |source| PaddingError::Write { path: path.to_path_buf(), source };
    let mut file = File::create(path)
        .map_err(|source| PaddingError::Create { path: path.to_path_buf(), source })?;
    let mut chunk = vec![0u8; CHUNK_SIZE];
    for _ in 0..size_mb {
        getrandom::getrandom(&mut chunk).map_err(|e| PaddingError::Random(e.to_string()))?;
        file.write_all(&chunk).map_err(write_err)?;
    }
    file.sync_all().map_err(write_err)
}

fn verify(path: &Path, expected: u64) -> Result<u64, PaddingError> {
    let actual = std::fs::metadata(path)
        .map_err(|source| PaddingError::Write { path: path.to_path_buf(), source })?
        .len();
    if actual < expected {
        return Err(PaddingError::Truncated { path: path.to_path_buf(), expected, actual });
    }
    Ok(actual)
}

#[cfg(test)]
#[path = "padding_tests.rs"]
mod tests;
