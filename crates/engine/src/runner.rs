// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runner: one packaging run from launch to cleanup.
//!
//! Emits, in order: `JobStarted`, any number of `JobLog`, exactly one
//! `JobExited`, then `JobCleaned` after the shared padding handle is given
//! back. Send failures mean the session loop is gone; the run still
//! completes so cleanup always happens.

use crate::error::JobError;
use crate::padding::PaddingFile;
use crate::scripts::remove_script;
use std::sync::Arc;
use tokio::sync::mpsc;
use webexe_adapters::{Invocation, OutputLine, PackagerAdapter, PackagerError};
use webexe_core::{BuildJob, Event, JobOutcome, JobResult};

/// Lines buffered between the packaging process readers and the session
const LINE_BUFFER: usize = 64;

pub async fn run_job<P: PackagerAdapter>(
    job: BuildJob,
    packager: P,
    program: String,
    padding: Option<Arc<PaddingFile>>,
    events: mpsc::Sender<Event>,
) -> JobResult {
    let index = job.index;
    send(&events, Event::JobStarted { index }).await;
    tracing::info!(job = index, title = %job.title, url = %job.url, "packaging started");

    let invocation = Invocation::new(program, job.args.clone());
    let outcome = match package(&invocation, &packager, index, &events).await {
        Ok(()) => JobOutcome::Succeeded,
        Err(e) => {
            tracing::warn!(job = index, title = %job.title, error = %e, "packaging failed");
            JobOutcome::from(&e)
        }
    };

    if matches!(outcome, JobOutcome::Succeeded) {
        if let Err(e) = remove_script(&job.script_path) {
            tracing::warn!(
                job = index,
                path = %job.script_path.display(),
                error = %e,
                "script cleanup failed"
            );
            send(
                &events,
                Event::warn(format!(
                    "[{index}] could not delete {}: {e}",
                    job.script_path.display()
                )),
            )
            .await;
        }
    } else {
        send(
            &events,
            Event::info(format!("[{index}] kept {} for inspection", job.script_path.display())),
        )
        .await;
    }

    let result = JobResult::new(&job, outcome);
    send(&events, Event::JobExited { result: result.clone() }).await;

    if let Some(padding) = padding {
        match padding.release() {
            Ok(Some(path)) => {
                send(&events, Event::info(format!("removed padding file {}", path.display())))
                    .await;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(job = index, error = %e, "padding cleanup failed");
                send(&events, Event::warn(format!("could not delete padding file: {e}"))).await;
            }
        }
    }

    send(&events, Event::JobCleaned { index }).await;
    result
}

/// Run the packaging tool, forwarding output as `JobLog` events.
async fn package<P: PackagerAdapter>(
    invocation: &Invocation,
    packager: &P,
    index: usize,
    events: &mpsc::Sender<Event>,
) -> Result<(), JobError> {
    let (line_tx, mut line_rx) = mpsc::channel::<OutputLine>(LINE_BUFFER);
    let forward = async {
        while let Some(OutputLine { stream, line }) = line_rx.recv().await {
            send(events, Event::JobLog { index, stream, line }).await;
        }
    };
    let (status, ()) = tokio::join!(packager.run(invocation, line_tx), forward);

    match status {
        Ok(0) => Ok(()),
        Ok(code) => Err(JobError::Exit { code }),
        Err(PackagerError::NotFound { program }) => Err(JobError::ToolNotFound { program }),
        Err(e) => Err(JobError::Unknown(e.to_string())),
    }
}

async fn send(events: &mpsc::Sender<Event>, event: Event) {
    if events.send(event).await.is_err() {
        tracing::debug!("session loop closed, dropping job event");
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
