// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.
//!
//! Unset or empty variables yield `Ok(None)`; values that are present but
//! unusable are errors rather than silently ignored.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Packaging tool program: `WEBEXE_PACKAGER`
pub fn packager() -> Option<String> {
    non_empty("WEBEXE_PACKAGER")
}

/// Worker pool bound: `WEBEXE_MAX_JOBS` (at least 1)
pub fn max_jobs() -> Result<Option<usize>, ConfigError> {
    match parse::<usize>("WEBEXE_MAX_JOBS")? {
        Some(0) => Err(ConfigError::Invalid { var: "WEBEXE_MAX_JOBS", value: "0".into() }),
        other => Ok(other),
    }
}

/// Directory for launcher scripts and the padding file: `WEBEXE_TEMP_DIR`
pub fn temp_dir() -> Option<PathBuf> {
    non_empty("WEBEXE_TEMP_DIR").map(PathBuf::from)
}

/// Padding file size in MiB: `WEBEXE_PADDING_MB`
pub fn padding_mb() -> Result<Option<u64>, ConfigError> {
    parse("WEBEXE_PADDING_MB")
}

/// Elapsed-time tick period override: `WEBEXE_TICK_MS`
pub fn tick_period() -> Result<Option<Duration>, ConfigError> {
    Ok(parse::<u64>("WEBEXE_TICK_MS")?.filter(|ms| *ms > 0).map(Duration::from_millis))
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match non_empty(var) {
        None => Ok(None),
        Some(value) => {
            value.parse::<T>().map(Some).map_err(|_| ConfigError::Invalid { var, value })
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
