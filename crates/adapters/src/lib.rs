// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O: the packaging tool, desktop notifications,
//! and the host file manager.

pub mod notify;
pub mod opener;
pub mod packager;

pub use notify::{DesktopNotifyAdapter, Notice, NotifyAdapter, NotifyError, TracingNotifyAdapter};
pub use opener::{open_dir, OpenError};
pub use packager::{Invocation, OutputLine, PackagerAdapter, PackagerError, ProcessPackager};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use packager::{FakeOutcome, FakePackagerAdapter, FakeRun, PackagerCall};
