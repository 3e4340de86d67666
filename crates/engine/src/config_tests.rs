// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear_env() {
    for var in [
        "WEBEXE_PACKAGER",
        "WEBEXE_MAX_JOBS",
        "WEBEXE_TEMP_DIR",
        "WEBEXE_PADDING_MB",
        "WEBEXE_TICK_MS",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
fn defaults() {
    let config = EngineConfig::new();
    assert_eq!(config.packager, "pyinstaller");
    assert!(config.max_jobs >= 1);
    assert_eq!(config.padding_mb, 300);
    assert_eq!(config.tick_period, Duration::from_secs(1));
    assert_eq!(config.padding_file(), std::env::temp_dir().join("dummy_data.bin"));
}

#[test]
fn paths_follow_temp_dir() {
    let config = EngineConfig::new().temp_dir("/scratch");
    assert_eq!(config.script_path(3), PathBuf::from("/scratch/webexe_launcher_3.py"));
    assert_eq!(config.padding_file(), PathBuf::from("/scratch/dummy_data.bin"));

    let config = config.padding_path("/elsewhere/pad.bin");
    assert_eq!(config.padding_file(), PathBuf::from("/elsewhere/pad.bin"));
}

#[test]
fn tick_period_is_at_least_one_millisecond() {
    assert_eq!(
        EngineConfig::new().tick_period(Duration::ZERO).tick_period,
        Duration::from_millis(1)
    );
    assert_eq!(
        EngineConfig::new().tick_period(Duration::from_millis(250)).tick_period,
        Duration::from_millis(250)
    );
}

#[test]
fn max_jobs_is_at_least_one() {
    assert_eq!(EngineConfig::new().max_jobs(0).max_jobs, 1);
    assert_eq!(EngineConfig::new().max_jobs(8).max_jobs, 8);
}

#[test]
#[serial]
fn environment_overrides_defaults() {
    clear_env();
    std::env::set_var("WEBEXE_PACKAGER", "/usr/local/bin/pyinstaller");
    std::env::set_var("WEBEXE_MAX_JOBS", "2");
    std::env::set_var("WEBEXE_TEMP_DIR", "/var/tmp/webexe");
    std::env::set_var("WEBEXE_PADDING_MB", "1");

    let config = EngineConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.packager, "/usr/local/bin/pyinstaller");
    assert_eq!(config.max_jobs, 2);
    assert_eq!(config.temp_dir, PathBuf::from("/var/tmp/webexe"));
    assert_eq!(config.padding_mb, 1);
}

#[test]
#[serial]
fn invalid_environment_is_reported() {
    clear_env();
    std::env::set_var("WEBEXE_MAX_JOBS", "many");
    let err = EngineConfig::from_env().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::Invalid { var: "WEBEXE_MAX_JOBS", .. }));
}
