// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session state as a plain value updated by applying events.
//!
//! All display state for a session (job statuses, active count, elapsed
//! readout, log, last output directory) lives here. The session loop owns
//! the only instance and mutates it solely through [`SessionState::apply`].

use crate::event::Event;
use crate::job::{JobOutcome, JobResult, JobStatus};
use crate::time_fmt::format_hms;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Status of one job as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEntry {
    pub title: String,
    pub url: String,
    pub status: JobStatus,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Jobs keyed by 1-based index
    pub jobs: BTreeMap<usize, JobEntry>,
    /// Jobs queued but not yet cleaned up
    pub active_jobs: usize,
    /// Set once every job of the session has been queued
    pub submitted: bool,
    pub last_output_dir: Option<PathBuf>,
    /// Cleared when the last job's cleanup fires
    pub started_at: Option<Instant>,
    pub elapsed_secs: u64,
    pub log: Vec<String>,
    /// One entry per finished job, in completion order
    pub results: Vec<JobResult>,
    /// Jobs that could not be prepared, keyed by index
    pub skipped: BTreeMap<usize, String>,
    pub tool_missing: bool,
}

impl SessionState {
    /// Fresh state for a session starting at `now`.
    pub fn begin(now: Instant) -> Self {
        Self { started_at: Some(now), ..Self::default() }
    }

    /// Fold one event into the state.
    ///
    /// Job events that would break the job lifecycle (for example a second
    /// exit for the same job) are logged but leave the job untouched.
    pub fn apply(&mut self, event: &Event) {
        if let Some(line) = event.log_line() {
            self.log.push(line);
        }

        match event {
            Event::SessionStarted { .. } | Event::Note { .. } | Event::JobLog { .. } => {}
            Event::JobsSubmitted { .. } => {
                self.submitted = true;
                self.stop_clock_if_idle();
            }
            Event::Tick { elapsed_secs } => {
                if self.started_at.is_some() {
                    self.elapsed_secs = *elapsed_secs;
                }
            }
            Event::JobQueued { index, title, url } => {
                if self.jobs.contains_key(index) {
                    return;
                }
                self.jobs.insert(
                    *index,
                    JobEntry { title: title.clone(), url: url.clone(), status: JobStatus::Pending },
                );
                self.active_jobs += 1;
            }
            Event::JobSkipped { index, title, .. } => {
                if !self.jobs.contains_key(index) {
                    self.skipped.insert(*index, title.clone());
                }
            }
            Event::JobStarted { index } => {
                self.transition(*index, JobStatus::Running);
            }
            Event::JobExited { result } => {
                if !self.transition(result.index, JobStatus::from(&result.outcome)) {
                    return;
                }
                match result.outcome {
                    JobOutcome::Succeeded => {
                        self.last_output_dir = Some(result.output_dir.clone());
                    }
                    JobOutcome::ToolNotFound => self.tool_missing = true,
                    JobOutcome::Failed { .. } | JobOutcome::UnknownError { .. } => {}
                }
                self.results.push(result.clone());
            }
            Event::JobCleaned { index } => {
                if self.transition(*index, JobStatus::Cleaned) {
                    self.active_jobs = self.active_jobs.saturating_sub(1);
                    self.stop_clock_if_idle();
                }
            }
        }
    }

    /// True once all jobs were submitted and every one has been cleaned up.
    pub fn is_idle(&self) -> bool {
        self.submitted && self.active_jobs == 0
    }

    /// Directory the "open output" action should show, if any job succeeded.
    pub fn open_target(&self) -> Option<&Path> {
        self.last_output_dir.as_deref()
    }

    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }

    /// Finished jobs that did not succeed, plus jobs that were skipped.
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.succeeded_count() + self.skipped.len()
    }

    /// Jobs the session tried to build, whether queued or skipped.
    pub fn job_count(&self) -> usize {
        self.jobs.len() + self.skipped.len()
    }

    /// Nothing was skipped, every queued job finished, and each succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.skipped.is_empty()
            && !self.results.is_empty()
            && self.results.len() == self.jobs.len()
            && self.results.iter().all(JobResult::succeeded)
    }

    /// One-line summary, e.g. `2 active, 1 succeeded, 0 failed [00:00:42]`.
    pub fn status_line(&self) -> String {
        format!(
            "{} active, {} succeeded, {} failed [{}]",
            self.active_jobs,
            self.succeeded_count(),
            self.failed_count(),
            format_hms(self.elapsed_secs)
        )
    }

    fn transition(&mut self, index: usize, next: JobStatus) -> bool {
        let Some(entry) = self.jobs.get_mut(&index) else {
            return false;
        };
        if !entry.status.can_transition_to(&next) {
            self.log.push(format!("[{index}] ignored {next} while {}", entry.status));
            return false;
        }
        entry.status = next;
        true
    }

    fn stop_clock_if_idle(&mut self) {
        if self.is_idle() {
            self.started_at = None;
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
