// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration

use crate::env;
use crate::error::ConfigError;
use crate::padding::{DEFAULT_PADDING_MB, PADDING_FILE_NAME};
use crate::ticker::MIN_TICK_PERIOD;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PACKAGER: &str = "pyinstaller";
/// File name prefix of generated launcher scripts in the temp directory
pub const SCRIPT_PREFIX: &str = "webexe_launcher";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Packaging tool program, resolved through PATH
    pub packager: String,
    /// Jobs allowed to run their packaging process at once
    pub max_jobs: usize,
    pub temp_dir: PathBuf,
    /// Overrides `<temp_dir>/dummy_data.bin`
    pub padding_path: Option<PathBuf>,
    pub padding_mb: u64,
    pub tick_period: Duration,
}

impl EngineConfig {
    /// Defaults for the host: system temp dir, one job per available CPU.
    pub fn new() -> Self {
        Self {
            packager: DEFAULT_PACKAGER.to_string(),
            max_jobs: std::thread::available_parallelism().map(usize::from).unwrap_or(1),
            temp_dir: std::env::temp_dir(),
            padding_path: None,
            padding_mb: DEFAULT_PADDING_MB,
            tick_period: Duration::from_secs(1),
        }
    }

    /// Defaults overridden by `WEBEXE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();
        if let Some(packager) = env::packager() {
            config.packager = packager;
        }
        if let Some(max_jobs) = env::max_jobs()? {
            config.max_jobs = max_jobs;
        }
        if let Some(temp_dir) = env::temp_dir() {
            config.temp_dir = temp_dir;
        }
        if let Some(mb) = env::padding_mb()? {
            config.padding_mb = mb;
        }
        if let Some(period) = env::tick_period()? {
            config.tick_period = period;
        }
        tracing::debug!(?config, "engine config loaded");
        Ok(config)
    }

    webexe_core::setters! {
        into {
            packager: String,
            temp_dir: PathBuf,
        }
        set {
            padding_mb: u64,
        }
        option {
            padding_path: PathBuf,
        }
    }

    /// Pool bound; zero is raised to one.
    pub fn max_jobs(mut self, max_jobs: usize) -> Self {
        self.max_jobs = max_jobs.max(1);
        self
    }

    /// Ticker period; anything shorter than a millisecond is raised to one.
    pub fn tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period.max(MIN_TICK_PERIOD);
        self
    }

    pub fn padding_file(&self) -> PathBuf {
        self.padding_path.clone().unwrap_or_else(|| self.temp_dir.join(PADDING_FILE_NAME))
    }

    /// Launcher script location for the job at 1-based `index`.
    pub fn script_path(&self, index: usize) -> PathBuf {
        script_path_in(&self.temp_dir, index)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn script_path_in(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{SCRIPT_PREFIX}_{index}.py"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
