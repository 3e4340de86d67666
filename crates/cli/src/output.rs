// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console rendering of session events and the final summary.
//!
//! Text mode prints the session log with colors and keeps a live elapsed
//! readout on stderr when stderr is a terminal. JSON mode prints one event
//! object per line followed by a `session:summary` object.

use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use webexe_core::{Event, JobOutcome, JobResult, NoteLevel, SessionState};
use webexe_engine::SessionObserver;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Stdout text for one event, or `None` when the event prints nothing.
///
/// Ticks are skipped in text mode; they drive the stderr readout instead.
pub fn render_event(event: &Event, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(event).ok(),
        OutputFormat::Text => event.log_line().map(|line| style_line(event, &line)),
    }
}

fn style_line(event: &Event, line: &str) -> String {
    match event {
        Event::SessionStarted { .. } | Event::JobsSubmitted { .. } | Event::JobCleaned { .. } => {
            color::header(line)
        }
        Event::Note { level: NoteLevel::Warn, .. } => color::warn(line),
        Event::Note { level: NoteLevel::Error, .. } => color::error(line),
        Event::JobLog { .. } => color::context(line),
        Event::JobSkipped { .. } => color::error(line),
        Event::JobExited { result } if !result.succeeded() => color::error(line),
        _ => line.to_string(),
    }
}

/// Prints events as the session loop applies them.
pub struct ConsoleObserver {
    format: OutputFormat,
    out: Box<dyn Write + Send>,
    live_readout: bool,
    readout_shown: bool,
}

impl ConsoleObserver {
    pub fn new(format: OutputFormat) -> Self {
        let live = format == OutputFormat::Text && std::io::stderr().is_terminal();
        Self::with_writer(format, std::io::stdout(), live)
    }

    pub fn with_writer(
        format: OutputFormat,
        out: impl Write + Send + 'static,
        live_readout: bool,
    ) -> Self {
        Self { format, out: Box::new(out), live_readout, readout_shown: false }
    }

    fn show_readout(&mut self, state: &SessionState) {
        let mut err = std::io::stderr();
        let _ = write!(err, "\r{}", color::context(&state.status_line()));
        let _ = err.flush();
        self.readout_shown = true;
    }

    fn clear_readout(&mut self) {
        if self.readout_shown {
            let _ = write!(std::io::stderr(), "\r\x1b[2K");
            self.readout_shown = false;
        }
    }
}

impl SessionObserver for ConsoleObserver {
    fn on_event(&mut self, event: &Event, state: &SessionState) {
        if matches!(event, Event::Tick { .. }) && self.live_readout {
            self.show_readout(state);
        }
        let Some(text) = render_event(event, self.format) else {
            return;
        };
        self.clear_readout();
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::debug!(error = %e, "console write failed");
        }
    }
}

/// Per-job result lines for the text summary.
pub fn summary_lines(state: &SessionState) -> Vec<String> {
    let skipped = state
        .skipped
        .iter()
        .map(|(index, title)| color::error(&format!("[{index}] {title}: skipped")));
    state.results.iter().map(result_line).chain(skipped).collect()
}

fn result_line(result: &JobResult) -> String {
    let label = format!("[{}] {}", result.index, result.title);
    match &result.outcome {
        JobOutcome::Succeeded => format!("{label}: ok -> {}", result.output_dir.display()),
        JobOutcome::Failed { exit_code } => {
            color::error(&format!("{label}: failed (exit code {exit_code})"))
        }
        JobOutcome::ToolNotFound => color::error(&format!("{label}: packaging tool not found")),
        JobOutcome::UnknownError { message } => color::error(&format!("{label}: error: {message}")),
    }
}

pub fn summary_json(state: &SessionState) -> serde_json::Value {
    serde_json::json!({
        "type": "session:summary",
        "jobs": state.job_count(),
        "succeeded": state.succeeded_count(),
        "failed": state.failed_count(),
        "skipped": state.skipped.len(),
        "elapsed_secs": state.elapsed_secs,
        "open_target": state.open_target(),
        "results": state.results,
    })
}

pub fn print_summary(state: &SessionState, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&summary_json(state))?),
        OutputFormat::Text => {
            println!("{}", color::header(&format!("--- {} ---", state.status_line())));
            for line in summary_lines(state) {
                println!("  {line}");
            }
        }
    }
    Ok(())
}
