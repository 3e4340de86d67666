// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded worker pool for job runners.
//!
//! Every submitted job gets its own task and `JoinHandle` immediately; a
//! semaphore limits how many are past the gate at once. Queued jobs hold
//! their resources (such as the padding handle) while they wait.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};
use webexe_core::JobResult;

pub struct WorkerPool {
    permits: Arc<Semaphore>,
    handles: Vec<(usize, JoinHandle<JobResult>)>,
}

impl WorkerPool {
    pub fn new(max_jobs: usize) -> Self {
        Self { permits: Arc::new(Semaphore::new(max_jobs.max(1))), handles: Vec::new() }
    }

    /// Spawn `job` (identified by its 1-based `index`); it starts once a
    /// permit is free.
    pub fn submit<F>(&mut self, index: usize, job: F)
    where
        F: Future<Output = JobResult> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let handle = tokio::spawn(async move {
            // Never closed, so this cannot fail
            let _permit = permits.acquire_owned().await.ok();
            job.await
        });
        self.handles.push((index, handle));
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every job, in submission order.
    pub async fn join(self) -> Vec<(usize, Result<JobResult, JoinError>)> {
        let mut results = Vec::with_capacity(self.handles.len());
        for (index, handle) in self.handles {
            results.push((index, handle.await));
        }
        results
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
