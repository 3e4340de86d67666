// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `webexe build` sessions against a scripted packaging tool

use crate::prelude::*;

fn build(ws: &Workspace) -> CliBuilder {
    let out = ws.out_dir();
    cli()
        .in_workspace(ws)
        .args(&["build", "--no-notify", "-d", out.to_str().unwrap()])
}

#[cfg(unix)]
#[test]
fn packages_every_url() {
    let ws = Workspace::new();
    build(&ws)
        .args(&["https://a.test", "https://b.test"])
        .passes()
        .stdout_has("--- session started: 2 URL(s) ---")
        .stdout_has("[1] queued App1: https://a.test")
        .stdout_has("[2] queued App2: https://b.test")
        .stdout_has("[1 stdout] building App1")
        .stdout_has("[2 stderr] note from App2")
        .stdout_has("--- 2 job(s) submitted ---")
        .stdout_has("0 active, 2 succeeded, 0 failed");

    assert!(ws.out_dir().join("App1").exists());
    assert!(ws.out_dir().join("App2").exists());
    assert!(ws.temp_files().is_empty(), "{:?}", ws.temp_files());
}

#[cfg(unix)]
#[test]
fn failed_job_keeps_its_script_and_exits_one() {
    let ws = Workspace::new();
    build(&ws)
        .env("FAKE_FAIL_NAME", "App2")
        .args(&["https://a.test", "https://b.test"])
        .fails_with(1)
        .stdout_has("[2] packaging App2 failed with exit code 4")
        .stdout_has("kept")
        .stdout_has("[2] App2: failed (exit code 4)")
        .stderr_has("1 of 2 job(s) failed");

    assert!(ws.out_dir().join("App1").exists());
    assert_eq!(ws.temp_files(), vec!["webexe_launcher_2.py"]);
}

#[cfg(unix)]
#[test]
fn missing_tool_exits_three() {
    let ws = Workspace::new();
    let missing = ws.path().join("no-such-packager");
    build(&ws)
        .env("WEBEXE_PACKAGER", &missing)
        .args(&["https://a.test"])
        .fails_with(3)
        .stdout_has("packaging tool not found")
        .stderr_has("packaging tool not found");
}

#[cfg(unix)]
#[test]
fn rejects_empty_url_list() {
    let ws = Workspace::new();
    build(&ws).args(&["", "  "]).fails_with(2).stderr_has("enter at least one URL");
    assert!(!ws.out_dir().exists());
}

#[cfg(unix)]
#[test]
fn rejects_missing_output_dir() {
    let ws = Workspace::new();
    cli()
        .in_workspace(&ws)
        .args(&["build", "--no-notify", "https://a.test"])
        .fails_with(2)
        .stderr_has("choose an output directory");
}

#[cfg(unix)]
#[test]
fn invalid_environment_is_a_setup_failure() {
    let ws = Workspace::new();
    build(&ws)
        .env("WEBEXE_MAX_JOBS", "0")
        .args(&["https://a.test"])
        .fails_with(2)
        .stderr_has("invalid WEBEXE_MAX_JOBS");
}

#[cfg(unix)]
#[test]
fn title_applies_to_every_job() {
    let ws = Workspace::new();
    build(&ws)
        .args(&["https://a.test", "https://b.test", "--title", "Portal"])
        .passes()
        .stdout_has("[1] queued Portal: https://a.test")
        .stdout_has("[2] queued Portal: https://b.test")
        .stdout_lacks("App1");
    assert!(ws.out_dir().join("Portal").exists());
}

#[cfg(unix)]
#[test]
fn url_file_blank_lines_are_reported() {
    let ws = Workspace::new();
    let urls = ws.file("urls.txt", "https://a.test\n\nhttps://b.test\n");
    build(&ws)
        .args(&["--urls-file", urls.to_str().unwrap()])
        .passes()
        .stdout_has("skipping blank line 2")
        .stdout_has("[3] queued App3: https://b.test");
}

#[cfg(unix)]
#[test]
fn inflation_bundles_and_removes_padding() {
    let ws = Workspace::new();
    build(&ws)
        .args(&["https://a.test", "https://b.test", "--inflate"])
        .passes()
        .stdout_has("--noupx")
        .stdout_has("dummy_data.bin")
        .stdout_has("removed padding file");
    assert!(ws.temp_files().is_empty(), "{:?}", ws.temp_files());
}

#[cfg(unix)]
#[test]
fn request_file_supplies_metadata() {
    let ws = Workspace::new();
    let request = ws.file(
        "request.toml",
        "urls = [\"https://a.test\"]\ntitle = \"Docs\"\nversion = \"2.0\"\ncompany = \"Acme\"\n",
    );
    build(&ws)
        .args(&["--request", request.to_str().unwrap()])
        .passes()
        .stdout_has("metadata: version=2.0, company=Acme")
        .stdout_has("[1] queued Docs: https://a.test");
}

#[cfg(unix)]
#[test]
fn json_output_streams_events_then_summary() {
    let ws = Workspace::new();
    let run = build(&ws).args(&["--output", "json", "https://a.test"]).passes();
    let lines = run.json_lines();

    assert_eq!(lines.first().unwrap()["type"], "session:started");
    let summary = lines.last().unwrap();
    assert_eq!(summary["type"], "session:summary");
    assert_eq!(summary["succeeded"], 1);
    assert_eq!(summary["failed"], 0);
    assert!(lines
        .iter()
        .any(|l| l["type"] == "job:exited" && l["result"]["outcome"]["kind"] == "succeeded"));
}

#[cfg(unix)]
#[test]
fn unwritable_script_dir_skips_jobs_and_exits_one() {
    let ws = Workspace::new();
    build(&ws)
        .env("WEBEXE_TEMP_DIR", ws.path().join("no-such-dir"))
        .args(&["https://a.test"])
        .fails_with(1)
        .stdout_has("[1] skipped App1")
        .stdout_has("[1] App1: skipped")
        .stderr_has("no job could be started");
}
