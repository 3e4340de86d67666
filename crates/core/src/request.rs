// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build requests: the URL list plus packaging metadata for one session.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a request is rejected before any job is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("enter at least one URL")]
    NoUrls,
    #[error("choose an output directory")]
    NoOutputDir,
}

/// One non-blank URL and the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlLine {
    pub line: usize,
    pub url: String,
}

/// Non-blank URL lines, plus the 1-based line numbers that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlLines {
    pub urls: Vec<UrlLine>,
    pub skipped: Vec<usize>,
}

/// Split pasted URL text into one URL per non-blank line.
///
/// Leading and trailing blank lines are ignored entirely; blank lines in
/// between are reported in `skipped` so the session log can mention them.
/// Line numbers count from the first non-blank line and number the jobs,
/// so `a`, blank, `b` yields jobs 1 and 3.
pub fn parse_url_lines(text: &str) -> UrlLines {
    let mut parsed = UrlLines::default();
    for (idx, line) in text.trim().lines().enumerate() {
        let url = line.trim();
        if url.is_empty() {
            parsed.skipped.push(idx + 1);
        } else {
            parsed.urls.push(UrlLine { line: idx + 1, url: url.to_string() });
        }
    }
    parsed
}

/// Everything the user supplied for one packaging session.
///
/// Empty strings and empty paths mean "not set", matching what a form with
/// blank fields produces. The accessors below normalize that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildRequest {
    pub urls: Vec<String>,
    pub title: String,
    pub version: String,
    pub company: String,
    pub description: String,
    pub icon_path: Option<PathBuf>,
    pub window_icon_path: Option<PathBuf>,
    pub splash_html_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub use_embedded_browser: bool,
    pub use_splash: bool,
    pub inflate_size: bool,
}

impl BuildRequest {
    pub fn new(
        urls: impl IntoIterator<Item = impl Into<String>>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    crate::setters! {
        into {
            title: String,
            version: String,
            company: String,
            description: String,
        }
        set {
            use_embedded_browser: bool,
            use_splash: bool,
            inflate_size: bool,
        }
        option {
            icon_path: PathBuf,
            window_icon_path: PathBuf,
            splash_html_path: PathBuf,
        }
    }

    /// Check the request can start a session: URLs first, then output dir.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.urls().next().is_none() {
            return Err(ValidationError::NoUrls);
        }
        if self.output_dir.to_string_lossy().trim().is_empty() {
            return Err(ValidationError::NoOutputDir);
        }
        Ok(())
    }

    /// Non-blank URLs in input order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty())
    }

    /// Title for the job at 1-based `index`; blank titles become `App<index>`.
    pub fn resolved_title(&self, index: usize) -> String {
        let title = self.title.trim();
        if title.is_empty() {
            format!("App{index}")
        } else {
            title.to_string()
        }
    }

    pub fn icon(&self) -> Option<&Path> {
        non_empty(&self.icon_path)
    }

    pub fn window_icon(&self) -> Option<&Path> {
        non_empty(&self.window_icon_path)
    }

    pub fn splash_html(&self) -> Option<&Path> {
        non_empty(&self.splash_html_path)
    }

    /// Window icon path with backslashes turned into forward slashes, or an
    /// empty string when unset.
    pub fn cleaned_window_icon(&self) -> String {
        self.window_icon().map(|p| p.to_string_lossy().replace('\\', "/")).unwrap_or_default()
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
