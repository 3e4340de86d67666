// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading build requests and URL lists from files.
//!
//! A request file is TOML keyed by the request's field names:
//!
//! ```toml
//! urls = ["https://example.com", "https://example.org"]
//! title = "Portal"
//! output_dir = "~/Desktop/launchers"
//! use_embedded_browser = true
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;
use webexe_core::BuildRequest;

#[derive(Debug, Error)]
pub enum RequestFileError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid request file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub fn load_request(path: &Path) -> Result<BuildRequest, RequestFileError> {
    let text = read(path)?;
    let mut request: BuildRequest = toml::from_str(&text)
        .map_err(|source| RequestFileError::Parse { path: path.to_path_buf(), source })?;

    request.output_dir = expand_home(&request.output_dir);
    let paths =
        [&mut request.icon_path, &mut request.window_icon_path, &mut request.splash_html_path];
    for field in paths {
        if let Some(p) = field.as_mut() {
            *p = expand_home(p);
        }
    }
    Ok(request)
}

/// Lines of a URL list file. Blank lines are kept so the session log can
/// point at them; surrounding whitespace of the whole file is dropped.
pub fn read_url_file(path: &Path) -> Result<Vec<String>, RequestFileError> {
    let text = read(path)?;
    Ok(text.trim().lines().map(str::to_string).collect())
}

/// Replace a leading `~` with the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn read(path: &Path) -> Result<String, RequestFileError> {
    std::fs::read_to_string(path)
        .map_err(|source| RequestFileError::Read { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "request_file_tests.rs"]
mod tests;
