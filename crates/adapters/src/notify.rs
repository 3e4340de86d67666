// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use thiserror::Error;
use webexe_core::NoteLevel;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoteLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoteLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level, title: title.into(), message: message.into() }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoteLevel::Error, title, message)
    }

    pub fn warn(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoteLevel::Warn, title, message)
    }
}

/// Adapter for surfacing notifications to the user
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    async fn notify(&self, notice: &Notice) -> Result<(), NotifyError>;
}

/// Desktop notification adapter using notify-rust.
///
/// On macOS, `notify-rust` goes through `mac-notification-sys`, whose first
/// call runs an AppleScript lookup of the sending application's bundle
/// identifier. That lookup can hang when the terminal lacks Automation
/// permission, so the identifier is set up front.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        let notice = notice.clone();
        // show() blocks on some platforms; fire-and-forget on the blocking pool
        tokio::task::spawn_blocking(move || {
            let summary = format!("webexe: {}", notice.title);
            match notify_rust::Notification::new()
                .summary(&summary)
                .body(&notice.message)
                .show()
            {
                Ok(_) => tracing::debug!(title = %notice.title, "desktop notification sent"),
                Err(e) => {
                    tracing::warn!(title = %notice.title, error = %e, "desktop notification failed")
                }
            }
        });
        Ok(())
    }
}

/// Writes notifications to the tracing log only; for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifyAdapter;

#[async_trait]
impl NotifyAdapter for TracingNotifyAdapter {
    async fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        match notice.level {
            NoteLevel::Info => tracing::info!(title = %notice.title, "{}", notice.message),
            NoteLevel::Warn => tracing::warn!(title = %notice.title, "{}", notice.message),
            NoteLevel::Error => tracing::error!(title = %notice.title, "{}", notice.message),
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Notice, NotifyAdapter, NotifyError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Fake notification adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeNotifyAdapter {
        calls: Arc<Mutex<Vec<Notice>>>,
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Get all recorded notifications
        pub fn calls(&self) -> Vec<Notice> {
            self.calls.lock().clone()
        }

        pub fn titles(&self) -> Vec<String> {
            self.calls.lock().iter().map(|n| n.title.clone()).collect()
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        async fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
            self.calls.lock().push(notice.clone());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifyAdapter;

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
