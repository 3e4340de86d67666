// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build jobs and their lifecycle.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One packaging invocation for one URL.
///
/// Immutable once planned; the runner that executes it owns the generated
/// script file at `script_path` until cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildJob {
    /// 1-based position among the session's URLs
    pub index: usize,
    pub title: String,
    pub url: String,
    pub script_path: PathBuf,
    /// Arguments for the packaging tool, program name excluded
    pub args: Vec<String>,
    pub output_dir: PathBuf,
}

/// Lifecycle of a job.
///
/// `Pending → Running → {Succeeded | Failed | ToolNotFound | UnknownError} → Cleaned`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed { exit_code: i32 },
    ToolNotFound,
    UnknownError { message: String },
    Cleaned,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded
                | JobStatus::Failed { .. }
                | JobStatus::ToolNotFound
                | JobStatus::UnknownError { .. }
        )
    }

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: &JobStatus) -> bool {
        match (self, next) {
            (JobStatus::Pending, JobStatus::Running) => true,
            // Launch failures surface before the job is observed running
            (JobStatus::Pending | JobStatus::Running, next) if next.is_terminal() => true,
            (current, JobStatus::Cleaned) => current.is_terminal(),
            _ => false,
        }
    }
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Running => "running",
        Succeeded => "succeeded",
        Failed { .. } => "failed",
        ToolNotFound => "tool not found",
        UnknownError { .. } => "error",
        Cleaned => "cleaned",
    }
}

/// Terminal outcome of a packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobOutcome {
    Succeeded,
    Failed { exit_code: i32 },
    ToolNotFound,
    UnknownError { message: String },
}

impl From<&JobOutcome> for JobStatus {
    fn from(outcome: &JobOutcome) -> Self {
        match outcome {
            JobOutcome::Succeeded => JobStatus::Succeeded,
            JobOutcome::Failed { exit_code } => JobStatus::Failed { exit_code: *exit_code },
            JobOutcome::ToolNotFound => JobStatus::ToolNotFound,
            JobOutcome::UnknownError { message } => {
                JobStatus::UnknownError { message: message.clone() }
            }
        }
    }
}

/// Produced exactly once per job when its packaging process ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub index: usize,
    pub title: String,
    pub outcome: JobOutcome,
    pub output_dir: PathBuf,
}

impl JobResult {
    pub fn new(job: &BuildJob, outcome: JobOutcome) -> Self {
        Self {
            index: job.index,
            title: job.title.clone(),
            outcome,
            output_dir: job.output_dir.clone(),
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, JobOutcome::Succeeded)
    }

    /// Process exit code, when the process ran at all.
    pub fn exit_code(&self) -> Option<i32> {
        match self.outcome {
            JobOutcome::Succeeded => Some(0),
            JobOutcome::Failed { exit_code } => Some(exit_code),
            JobOutcome::ToolNotFound | JobOutcome::UnknownError { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
