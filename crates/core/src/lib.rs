// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! webexe-core: data model and text generation for the webexe launcher builder

pub mod macros;

pub mod clock;
pub mod command;
pub mod event;
pub mod job;
pub mod request;
pub mod script;
pub mod session;
pub mod template;
pub mod time_fmt;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use command::{add_data_arg, packager_args, render_command_line, PackagerArgs, DATA_SEPARATOR};
pub use event::{Event, NoteLevel, Stream};
pub use job::{BuildJob, JobOutcome, JobResult, JobStatus};
pub use request::{parse_url_lines, BuildRequest, UrlLine, UrlLines, ValidationError};
pub use script::{render_launcher, select_variant, LauncherScript, LauncherSpec, LauncherVariant};
pub use session::{JobEntry, SessionState};
pub use time_fmt::format_hms;
