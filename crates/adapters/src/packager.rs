// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Packaging tool adapter.
//!
//! Runs the external executable builder as a child process and streams its
//! output line by line. Lines from one stream arrive in emission order;
//! stdout and stderr are drained concurrently with no ordering between them.

use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use webexe_core::Stream;

/// Program plus arguments for one packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// Value following the first occurrence of `flag`.
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        let pos = self.args.iter().position(|a| a == flag)?;
        self.args.get(pos + 1).map(String::as_str)
    }

    /// Values of every occurrence of `flag`, in order.
    pub fn values_of<'a>(&'a self, flag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.args.windows(2).filter(move |w| w[0] == flag).map(|w| w[1].as_str())
    }
}

/// One line of packaging tool output, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: Stream,
    pub line: String,
}

/// Errors from running the packaging tool
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The executable could not be located
    #[error("packaging tool not found: {program}")]
    NotFound { program: String },
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for packaging process: {0}")]
    Wait(#[source] std::io::Error),
    #[error("failed reading packaging {stream}: {source}")]
    Read {
        stream: Stream,
        #[source]
        source: std::io::Error,
    },
}

/// Adapter for invoking the packaging tool
#[async_trait]
pub trait PackagerAdapter: Clone + Send + Sync + 'static {
    /// Run to completion, forwarding each output line to `output`.
    ///
    /// Returns the process exit code once both streams are drained. A
    /// process killed by a signal reports `-1`.
    async fn run(
        &self,
        invocation: &Invocation,
        output: mpsc::Sender<OutputLine>,
    ) -> Result<i32, PackagerError>;
}

/// Runs the packaging tool as a real child process.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessPackager;

#[async_trait]
impl PackagerAdapter for ProcessPackager {
    async fn run(
        &self,
        invocation: &Invocation,
        output: mpsc::Sender<OutputLine>,
    ) -> Result<i32, PackagerError> {
        let mut cmd = tokio::process::Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PackagerError::NotFound { program: invocation.program.clone() }
            } else {
                PackagerError::Spawn { program: invocation.program.clone(), source }
            }
        })?;
        tracing::debug!(
            program = %invocation.program,
            pid = ?child.id(),
            "packaging process started"
        );

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let readers: Vec<_> = [
            stdout.map(|r| (Stream::Stdout, spawn_reader(r, Stream::Stdout, output.clone()))),
            stderr.map(|r| (Stream::Stderr, spawn_reader(r, Stream::Stderr, output))),
        ]
        .into_iter()
        .flatten()
        .collect();

        let status = child.wait().await.map_err(PackagerError::Wait)?;

        // Report the exit only after every line has been forwarded
        for (stream, reader) in readers {
            join_reader(stream, reader).await?;
        }

        Ok(status.code().unwrap_or(-1))
    }
}

/// Wait for a reader task; a task that died is reported against its stream.
async fn join_reader(
    stream: Stream,
    reader: tokio::task::JoinHandle<Result<(), PackagerError>>,
) -> Result<(), PackagerError> {
    reader
        .await
        .map_err(|e| PackagerError::Read { stream, source: std::io::Error::other(e) })?
}

fn spawn_reader<R>(
    reader: R,
    stream: Stream,
    tx: mpsc::Sender<OutputLine>,
) -> tokio::task::JoinHandle<Result<(), PackagerError>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        forward_lines(reader, stream, tx)
            .await
            .map_err(|source| PackagerError::Read { stream, source })
    })
}

/// Read `reader` to EOF, sending each line. Invalid UTF-8 is replaced.
///
/// Keeps draining after the receiver is gone so the child never blocks on
/// a full pipe.
async fn forward_lines<R>(
    reader: R,
    stream: Stream,
    tx: mpsc::Sender<OutputLine>,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut receiver_open = true;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        if !receiver_open {
            continue;
        }
        let line = String::from_utf8_lossy(&buf).trim_end_matches(['\r', '\n']).to_string();
        if tx.send(OutputLine { stream, line }).await.is_err() {
            tracing::debug!(%stream, "output receiver closed, discarding remaining lines");
            receiver_open = false;
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Invocation, OutputLine, PackagerAdapter, PackagerError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use webexe_core::{Stream, DATA_SEPARATOR};

    /// Scripted behavior for one fake packaging run
    #[derive(Debug, Clone)]
    pub struct FakeRun {
        pub lines: Vec<OutputLine>,
        pub delay: Duration,
        pub outcome: FakeOutcome,
    }

    #[derive(Debug, Clone)]
    pub enum FakeOutcome {
        Exit(i32),
        NotFound,
        Error(String),
    }

    impl FakeRun {
        pub fn exit(code: i32) -> Self {
            Self { lines: Vec::new(), delay: Duration::ZERO, outcome: FakeOutcome::Exit(code) }
        }

        pub fn not_found() -> Self {
            Self { outcome: FakeOutcome::NotFound, ..Self::exit(0) }
        }

        pub fn error(message: impl Into<String>) -> Self {
            Self { outcome: FakeOutcome::Error(message.into()), ..Self::exit(0) }
        }

        pub fn stdout(mut self, line: impl Into<String>) -> Self {
            self.lines.push(OutputLine { stream: Stream::Stdout, line: line.into() });
            self
        }

        pub fn stderr(mut self, line: impl Into<String>) -> Self {
            self.lines.push(OutputLine { stream: Stream::Stderr, line: line.into() });
            self
        }

        pub fn delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl Default for FakeRun {
        fn default() -> Self {
            Self::exit(0)
        }
    }

    /// Recorded packaging run
    #[derive(Debug, Clone)]
    pub struct PackagerCall {
        pub invocation: Invocation,
        /// `--add-data` sources missing at start or end of the run
        pub missing_data: Vec<PathBuf>,
    }

    #[derive(Default)]
    struct FakePackagerState {
        runs: HashMap<String, FakeRun>,
        default_run: FakeRun,
        calls: Vec<PackagerCall>,
        in_flight: usize,
        max_in_flight: usize,
    }

    /// Fake packaging tool for testing. Runs are scripted per `--name` value.
    #[derive(Clone, Default)]
    pub struct FakePackagerAdapter {
        inner: Arc<Mutex<FakePackagerState>>,
    }

    impl FakePackagerAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Script the run for the job named `title`
        pub fn on(&self, title: impl Into<String>, run: FakeRun) -> &Self {
            self.inner.lock().runs.insert(title.into(), run);
            self
        }

        /// Script every run without a per-title entry
        pub fn on_any(&self, run: FakeRun) -> &Self {
            self.inner.lock().default_run = run;
            self
        }

        pub fn calls(&self) -> Vec<PackagerCall> {
            self.inner.lock().calls.clone()
        }

        /// Highest number of runs observed executing at once
        pub fn max_in_flight(&self) -> usize {
            self.inner.lock().max_in_flight
        }

        fn missing_data(invocation: &Invocation) -> Vec<PathBuf> {
            invocation
                .values_of("--add-data")
                .filter_map(|v| v.rsplit_once(DATA_SEPARATOR).map(|(src, _)| PathBuf::from(src)))
                .filter(|src| !src.exists())
                .collect()
        }
    }

    #[async_trait]
    impl PackagerAdapter for FakePackagerAdapter {
        async fn run(
            &self,
            invocation: &Invocation,
            output: mpsc::Sender<OutputLine>,
        ) -> Result<i32, PackagerError> {
            let missing_at_start = Self::missing_data(invocation);
            let (run, call_index) = {
                let mut inner = self.inner.lock();
                let title = invocation.arg_after("--name").unwrap_or_default();
                let run =
                    inner.runs.get(title).cloned().unwrap_or_else(|| inner.default_run.clone());
                inner.calls.push(PackagerCall {
                    invocation: invocation.clone(),
                    missing_data: missing_at_start,
                });
                if !matches!(run.outcome, FakeOutcome::NotFound) {
                    inner.in_flight += 1;
                    inner.max_in_flight = inner.max_in_flight.max(inner.in_flight);
                }
                (run, inner.calls.len() - 1)
            };

            if let FakeOutcome::NotFound = run.outcome {
                return Err(PackagerError::NotFound { program: invocation.program.clone() });
            }

            for line in run.lines {
                let _ = output.send(line).await;
            }
            if !run.delay.is_zero() {
                tokio::time::sleep(run.delay).await;
            }

            let missing_at_end = Self::missing_data(invocation);
            {
                let mut inner = self.inner.lock();
                inner.in_flight -= 1;
                let call = &mut inner.calls[call_index];
                for path in missing_at_end {
                    if !call.missing_data.contains(&path) {
                        call.missing_data.push(path);
                    }
                }
            }

            match run.outcome {
                FakeOutcome::Exit(code) => Ok(code),
                FakeOutcome::Error(message) => {
                    Err(PackagerError::Wait(std::io::Error::other(message)))
                }
                FakeOutcome::NotFound => {
                    Err(PackagerError::NotFound { program: invocation.program.clone() })
                }
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeOutcome, FakePackagerAdapter, FakeRun, PackagerCall};

#[cfg(test)]
#[path = "packager_tests.rs"]
mod tests;
