// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging setup.
//!
//! `WEBEXE_LOG` takes an `EnvFilter` directive (default `warn`); output goes
//! to stderr. `WEBEXE_LOG_FILE` additionally appends plain-text logs to that
//! file through a non-blocking writer.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init() -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_env("WEBEXE_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(crate::color::should_colorize());

    let (file, guard) = match std::env::var_os("WEBEXE_LOG_FILE") {
        Some(path) if !path.is_empty() => {
            let path = Path::new(&path);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().unwrap_or(path.as_os_str());
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (Some(fmt::layer().with_writer(writer).with_ansi(false).boxed()), Some(guard))
        }
        _ => (None, None),
    };

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry().with(filter).with(stderr).with(file).try_init();
    guard
}
