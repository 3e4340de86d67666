// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error carrying a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! so `main()` alone decides how the process ends.

use std::fmt;
use webexe_core::SessionState;
use webexe_engine::SessionError;

/// Exit codes
pub mod codes {
    pub const JOB_FAILED: i32 = 1;
    pub const SETUP_FAILED: i32 = 2;
    pub const TOOL_NOT_FOUND: i32 = 3;
}

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit status for a finished session, `None` when every job succeeded.
    pub fn from_session(state: &SessionState) -> Option<Self> {
        if state.tool_missing {
            return Some(Self::new(codes::TOOL_NOT_FOUND, "packaging tool not found"));
        }
        if state.all_succeeded() {
            return None;
        }
        if state.jobs.is_empty() {
            return Some(Self::new(codes::JOB_FAILED, "no job could be started"));
        }
        let total = state.job_count();
        let failed = total - state.succeeded_count();
        Some(Self::new(codes::JOB_FAILED, format!("{failed} of {total} job(s) failed")))
    }
}

impl From<SessionError> for ExitError {
    fn from(err: SessionError) -> Self {
        Self::new(codes::SETUP_FAILED, err.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
