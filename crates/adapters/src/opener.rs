// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opening a directory in the host file manager

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("directory does not exist: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// The platform's "open this location" program.
pub fn opener_program() -> &'static str {
    if cfg!(windows) {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Show `path` in the native file manager without waiting for it to exit.
pub fn open_dir(path: &Path) -> Result<(), OpenError> {
    if !path.is_dir() {
        return Err(OpenError::Missing(path.to_path_buf()));
    }
    let program = opener_program();
    let child = Command::new(program)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| OpenError::Launch { program, source })?;
    tracing::info!(program, pid = child.id(), path = %path.display(), "opened output directory");
    Ok(())
}

#[cfg(test)]
#[path = "opener_tests.rs"]
mod tests;
