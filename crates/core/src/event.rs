// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events flowing from the controller and job runners to the session loop

use crate::job::{JobOutcome, JobResult};
use crate::time_fmt::format_hms;
use serde::{Deserialize, Serialize};

/// Which output stream of the packaging process a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stream {
    Stdout,
    Stderr,
}

crate::simple_display! {
    Stream {
        Stdout => "stdout",
        Stderr => "stderr",
    }
}

/// Severity of a session log note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteLevel {
    Info,
    Warn,
    Error,
}

crate::simple_display! {
    NoteLevel {
        Info => "info",
        Warn => "warning",
        Error => "error",
    }
}

/// Everything that changes session state.
///
/// Serializes with `{"type": "scope:name", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "session:started")]
    SessionStarted { urls: usize },

    /// Free-form line for the session log
    #[serde(rename = "session:note")]
    Note { level: NoteLevel, message: String },

    #[serde(rename = "session:submitted")]
    JobsSubmitted { count: usize },

    #[serde(rename = "session:tick")]
    Tick { elapsed_secs: u64 },

    #[serde(rename = "job:queued")]
    JobQueued { index: usize, title: String, url: String },

    /// The job could not be prepared and never reached the pool
    #[serde(rename = "job:skipped")]
    JobSkipped { index: usize, title: String, message: String },

    #[serde(rename = "job:started")]
    JobStarted { index: usize },

    #[serde(rename = "job:log")]
    JobLog { index: usize, stream: Stream, line: String },

    #[serde(rename = "job:exited")]
    JobExited { result: JobResult },

    #[serde(rename = "job:cleaned")]
    JobCleaned { index: usize },
}

impl Event {
    pub fn info(message: impl Into<String>) -> Self {
        Event::Note { level: NoteLevel::Info, message: message.into() }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Event::Note { level: NoteLevel::Warn, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Event::Note { level: NoteLevel::Error, message: message.into() }
    }

    /// Text shown in the session log for this event, if any.
    ///
    /// Ticks only drive the elapsed readout and produce no log line.
    pub fn log_line(&self) -> Option<String> {
        let line = match self {
            Event::SessionStarted { urls } => format!("--- session started: {urls} URL(s) ---"),
            Event::Note { level: NoteLevel::Info, message } => message.clone(),
            Event::Note { level, message } => format!("{level}: {message}"),
            Event::JobsSubmitted { count } => format!("--- {count} job(s) submitted ---"),
            Event::Tick { .. } => return None,
            Event::JobQueued { index, title, url } => format!("[{index}] queued {title}: {url}"),
            Event::JobSkipped { index, title, message } => {
                format!("[{index}] skipped {title}: {message}")
            }
            Event::JobStarted { index } => format!("[{index}] packaging"),
            Event::JobLog { index, stream, line } => format!("[{index} {stream}] {line}"),
            Event::JobExited { result } => {
                let JobResult { index, title, .. } = result;
                match &result.outcome {
                    JobOutcome::Succeeded => {
                        format!("[{index}] packaged {title} into {}", result.output_dir.display())
                    }
                    JobOutcome::Failed { exit_code } => {
                        format!("[{index}] packaging {title} failed with exit code {exit_code}")
                    }
                    JobOutcome::ToolNotFound => {
                        format!("[{index}] packaging tool not found; is it installed and on PATH?")
                    }
                    JobOutcome::UnknownError { message } => {
                        format!("[{index}] packaging {title} errored: {message}")
                    }
                }
            }
            Event::JobCleaned { index } => format!("[{index}] --- job finished ---"),
        };
        Some(line)
    }

    /// Elapsed readout text for tick events.
    pub fn elapsed_readout(&self) -> Option<String> {
        match self {
            Event::Tick { elapsed_secs } => Some(format_hms(*elapsed_secs)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
