// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types

use std::path::PathBuf;
use thiserror::Error;
use webexe_core::{JobOutcome, ValidationError};

/// Session setup failures. Nothing has been queued when these are returned.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot create output directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-job failures. None of these affect sibling jobs.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("cannot write launcher script {}: {source}", path.display())]
    ScriptWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("packaging tool {program} not found; is it installed and on PATH?")]
    ToolNotFound { program: String },
    #[error("packaging exited with code {code}")]
    Exit { code: i32 },
    #[error("{0}")]
    Unknown(String),
}

impl From<&JobError> for JobOutcome {
    fn from(err: &JobError) -> Self {
        match err {
            JobError::ToolNotFound { .. } => JobOutcome::ToolNotFound,
            JobError::Exit { code } => JobOutcome::Failed { exit_code: *code },
            JobError::ScriptWrite { .. } | JobError::Unknown(_) => {
                JobOutcome::UnknownError { message: err.to_string() }
            }
        }
    }
}

/// Unusable configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
