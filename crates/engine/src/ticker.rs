// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Elapsed-time ticker

use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use webexe_core::{Clock, Event};

/// Shortest period the ticker runs at; `tokio::time::interval` rejects zero
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Emit `Tick` every `period` with the whole seconds since `started`.
///
/// Stops when `cancel` fires or the session loop goes away. Cancelling
/// never affects running jobs.
pub fn spawn_ticker<C: Clock>(
    clock: C,
    started: Instant,
    period: Duration,
    events: mpsc::Sender<Event>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period.max(MIN_TICK_PERIOD));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let elapsed_secs = clock.elapsed_secs(started);
                    if events.send(Event::Tick { elapsed_secs }).await.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!(elapsed_secs = clock.elapsed_secs(started), "elapsed ticker stopped");
    })
}

#[cfg(test)]
#[path = "ticker_tests.rs"]
mod tests;
