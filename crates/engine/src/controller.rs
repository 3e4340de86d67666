// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session controller.
//!
//! `start` validates the request, prepares the output directory and the
//! optional padding file, then queues one job per URL on the worker pool and
//! returns without waiting. Everything that happens afterwards flows as
//! [`Event`]s through one channel into a single session loop, which owns the
//! [`SessionState`], informs the observer, raises notifications, and stops
//! the elapsed ticker once the session goes idle.

use crate::config::EngineConfig;
use crate::error::SessionError;
use crate::padding::{create_padding_file, PaddingFile};
use crate::pool::WorkerPool;
use crate::runner::run_job;
use crate::scripts::plan_job;
use crate::ticker::spawn_ticker;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use webexe_adapters::{Notice, NotifyAdapter, PackagerAdapter};
use webexe_core::{
    parse_url_lines, render_command_line, BuildRequest, Clock, Event, JobOutcome, SessionState,
    UrlLine,
};

/// Events buffered between workers and the session loop
const EVENT_BUFFER: usize = 256;

/// Receives every event after it has been applied to the session state.
pub trait SessionObserver: Send + 'static {
    fn on_event(&mut self, event: &Event, state: &SessionState);
}

impl<F> SessionObserver for F
where
    F: FnMut(&Event, &SessionState) + Send + 'static,
{
    fn on_event(&mut self, event: &Event, state: &SessionState) {
        self(event, state)
    }
}

pub struct SessionController<P, N, C> {
    packager: P,
    notifier: N,
    clock: C,
    config: EngineConfig,
}

impl<P, N, C> SessionController<P, N, C>
where
    P: PackagerAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    pub fn new(packager: P, notifier: N, clock: C, config: EngineConfig) -> Self {
        Self { packager, notifier, clock, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reject requests without URLs or without an output directory.
    pub async fn validate(&self, request: &BuildRequest) -> Result<(), SessionError> {
        if let Err(e) = request.validate() {
            tracing::warn!(error = %e, "request rejected");
            self.notify(Notice::error("Cannot start", e.to_string())).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Begin a session. Returns once every job has been queued.
    ///
    /// Fails only before any job exists: on validation or when the output
    /// directory cannot be created.
    pub async fn start<O: SessionObserver>(
        &self,
        request: BuildRequest,
        observer: O,
    ) -> Result<SessionHandle, SessionError> {
        self.validate(&request).await?;

        if let Err(source) = std::fs::create_dir_all(&request.output_dir) {
            let err = SessionError::DirectoryCreate { path: request.output_dir.clone(), source };
            tracing::warn!(error = %err, "output directory unavailable");
            self.notify(Notice::error("Cannot start", err.to_string())).await;
            return Err(err);
        }

        let started = self.clock.now();
        let (events, rx) = mpsc::channel(EVENT_BUFFER);
        let ticker = CancellationToken::new();
        let session_loop = tokio::spawn(session_loop(
            rx,
            SessionState::begin(started),
            observer,
            self.notifier.clone(),
            ticker.clone(),
        ));
        spawn_ticker(
            self.clock.clone(),
            started,
            self.config.tick_period,
            events.clone(),
            ticker.clone(),
        );

        let lines = parse_url_lines(&request.urls.join("\n"));
        tracing::info!(
            urls = lines.urls.len(),
            output = %request.output_dir.display(),
            "session started"
        );
        emit(&events, Event::SessionStarted { urls: lines.urls.len() }).await;
        for line in &lines.skipped {
            emit(&events, Event::info(format!("skipping blank line {line}"))).await;
        }
        self.announce_metadata(&request, &events).await;

        let padding = if request.inflate_size {
            self.prepare_padding(&events).await
        } else {
            None
        };

        let mut pool = WorkerPool::new(self.config.max_jobs);
        // Jobs are numbered by input line, so a skipped blank line leaves a gap
        for UrlLine { line, url } in &lines.urls {
            let index = *line;
            let padding_path = padding.as_deref().map(PaddingFile::path);
            let planned = match plan_job(&request, index, url, &self.config, padding_path) {
                Ok(planned) => planned,
                Err(e) => {
                    let title = request.resolved_title(index);
                    tracing::warn!(job = index, error = %e, "job skipped");
                    emit(
                        &events,
                        Event::JobSkipped { index, title: title.clone(), message: e.to_string() },
                    )
                    .await;
                    self.notify(Notice::error(title, e.to_string())).await;
                    continue;
                }
            };
            let job = planned.job;

            emit(
                &events,
                Event::JobQueued { index, title: job.title.clone(), url: job.url.clone() },
            )
            .await;
            emit(
                &events,
                Event::info(format!(
                    "[{index}] {} launcher, command: {}",
                    planned.variant,
                    render_command_line(&self.config.packager, &job.args)
                )),
            )
            .await;

            pool.submit(
                index,
                run_job(
                    job,
                    self.packager.clone(),
                    self.config.packager.clone(),
                    padding.clone(),
                    events.clone(),
                ),
            );
        }

        // The controller's own handle; jobs still holding one keep the file
        if let Some(padding) = padding {
            match padding.release() {
                Ok(Some(path)) => {
                    emit(&events, Event::info(format!("removed padding file {}", path.display())))
                        .await;
                }
                Ok(None) => {}
                Err(e) => {
                    emit(&events, Event::warn(format!("could not delete padding file: {e}"))).await;
                }
            }
        }

        tracing::info!(jobs = pool.len(), "all jobs submitted");
        emit(&events, Event::JobsSubmitted { count: pool.len() }).await;

        Ok(SessionHandle { queued: pool.len(), pool, session_loop, ticker })
    }

    async fn announce_metadata(&self, request: &BuildRequest, events: &mpsc::Sender<Event>) {
        let fields = [
            ("version", request.version.trim()),
            ("company", request.company.trim()),
            ("description", request.description.trim()),
        ];
        let set: Vec<String> = fields
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        if !set.is_empty() {
            emit(events, Event::info(format!("metadata: {}", set.join(", ")))).await;
        }
    }

    /// Create the shared padding file, or warn and continue without it.
    async fn prepare_padding(&self, events: &mpsc::Sender<Event>) -> Option<Arc<PaddingFile>> {
        let path = self.config.padding_file();
        let size_mb = self.config.padding_mb;
        emit(events, Event::info(format!("creating {size_mb} MB padding file {}", path.display())))
            .await;

        let created =
            tokio::task::spawn_blocking(move || create_padding_file(&path, size_mb)).await;
        let message = match created {
            Ok(Ok(padding)) => {
                emit(events, Event::info(format!("padding file ready ({} bytes)", padding.size())))
                    .await;
                return Some(Arc::new(padding));
            }
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };
        emit(events, Event::warn(format!("size inflation disabled: {message}"))).await;
        self.notify(Notice::warn(
            "Size inflation disabled",
            format!("{message}; packaging continues without it"),
        ))
        .await;
        None
    }

    async fn notify(&self, notice: Notice) {
        if let Err(e) = self.notifier.notify(&notice).await {
            tracing::warn!(title = %notice.title, error = %e, "notification failed");
        }
    }
}

/// A running session.
pub struct SessionHandle {
    queued: usize,
    pool: WorkerPool,
    session_loop: JoinHandle<SessionState>,
    ticker: CancellationToken,
}

impl SessionHandle {
    /// Jobs handed to the pool
    pub fn queued(&self) -> usize {
        self.queued
    }

    /// Stop elapsed-time updates; jobs keep running.
    pub fn stop_ticker(&self) {
        self.ticker.cancel();
    }

    /// Wait for every job and return the final session state.
    pub async fn wait(self) -> SessionState {
        for (index, joined) in self.pool.join().await {
            if let Err(e) = joined {
                tracing::error!(job = index, error = %e, "job task ended abnormally");
            }
        }
        // Every job is done; a session that never went idle still has to end
        self.ticker.cancel();
        match self.session_loop.await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "session loop ended abnormally");
                SessionState::default()
            }
        }
    }
}

async fn session_loop<O, N>(
    mut rx: mpsc::Receiver<Event>,
    mut state: SessionState,
    mut observer: O,
    notifier: N,
    ticker: CancellationToken,
) -> SessionState
where
    O: SessionObserver,
    N: NotifyAdapter,
{
    let mut tool_missing_notified = false;
    while let Some(event) = rx.recv().await {
        state.apply(&event);
        observer.on_event(&event, &state);

        if let Some(notice) = job_notice(&event, &mut tool_missing_notified) {
            if let Err(e) = notifier.notify(&notice).await {
                tracing::warn!(title = %notice.title, error = %e, "notification failed");
            }
        }

        if state.is_idle() && !ticker.is_cancelled() {
            tracing::info!(elapsed_secs = state.elapsed_secs, "session idle, stopping ticker");
            ticker.cancel();
        }
    }
    ticker.cancel();
    state
}

/// Notification for a finished job. A missing packaging tool is reported
/// once per session since it affects every job alike.
fn job_notice(event: &Event, tool_missing_notified: &mut bool) -> Option<Notice> {
    let Event::JobExited { result } = event else {
        return None;
    };
    match &result.outcome {
        JobOutcome::Succeeded => None,
        JobOutcome::Failed { exit_code } => Some(Notice::error(
            format!("Packaging {} failed", result.title),
            format!("exit code {exit_code}; see the log for details"),
        )),
        JobOutcome::ToolNotFound => {
            if std::mem::replace(tool_missing_notified, true) {
                return None;
            }
            Some(Notice::error(
                "Packaging tool not found",
                "make sure it is installed and on PATH",
            ))
        }
        JobOutcome::UnknownError { message } => Some(Notice::error(
            format!("Packaging {} errored", result.title),
            message.clone(),
        )),
    }
}

async fn emit(events: &mpsc::Sender<Event>, event: Event) {
    if events.send(event).await.is_err() {
        tracing::debug!("session loop closed, dropping event");
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
