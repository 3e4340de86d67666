// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! webexe-engine: runs packaging sessions

pub mod config;
pub mod controller;
pub mod env;
mod error;
pub mod padding;
pub mod pool;
pub mod runner;
pub mod scripts;
pub mod ticker;

pub use config::EngineConfig;
pub use controller::{SessionController, SessionHandle, SessionObserver};
pub use error::{ConfigError, JobError, SessionError};
pub use padding::{create_padding_file, remove_padding_file, PaddingError, PaddingFile};
pub use pool::WorkerPool;
