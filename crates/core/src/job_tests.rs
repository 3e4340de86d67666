// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn job(index: usize) -> BuildJob {
    BuildJob {
        index,
        title: format!("App{index}"),
        url: "https://example.com".to_string(),
        script_path: PathBuf::from(format!("/tmp/webexe_launcher_{index}.py")),
        args: vec![],
        output_dir: PathBuf::from("/out"),
    }
}

fn failed() -> JobStatus {
    JobStatus::Failed { exit_code: 1 }
}

fn unknown() -> JobStatus {
    JobStatus::UnknownError { message: "boom".into() }
}

#[yare::parameterized(
    pending_to_running       = { JobStatus::Pending,      JobStatus::Running,      true },
    running_to_succeeded     = { JobStatus::Running,      JobStatus::Succeeded,    true },
    running_to_failed        = { JobStatus::Running,      failed(),                true },
    pending_to_not_found     = { JobStatus::Pending,      JobStatus::ToolNotFound, true },
    running_to_unknown       = { JobStatus::Running,      unknown(),               true },
    succeeded_to_cleaned     = { JobStatus::Succeeded,    JobStatus::Cleaned,      true },
    not_found_to_cleaned     = { JobStatus::ToolNotFound, JobStatus::Cleaned,      true },
    pending_to_cleaned       = { JobStatus::Pending,      JobStatus::Cleaned,      false },
    running_to_cleaned       = { JobStatus::Running,      JobStatus::Cleaned,      false },
    succeeded_to_failed      = { JobStatus::Succeeded,    failed(),                false },
    cleaned_to_running       = { JobStatus::Cleaned,      JobStatus::Running,      false },
    running_to_pending       = { JobStatus::Running,      JobStatus::Pending,      false },
)]
fn transitions(from: JobStatus, to: JobStatus, allowed: bool) {
    assert_eq!(from.can_transition_to(&to), allowed);
}

#[test]
fn terminal_states() {
    assert!(JobStatus::Succeeded.is_terminal());
    assert!(failed().is_terminal());
    assert!(JobStatus::ToolNotFound.is_terminal());
    assert!(unknown().is_terminal());
    assert!(!JobStatus::Pending.is_terminal());
    assert!(!JobStatus::Running.is_terminal());
    assert!(!JobStatus::Cleaned.is_terminal());
}

#[test]
fn status_display() {
    assert_eq!(failed().to_string(), "failed");
    assert_eq!(JobStatus::ToolNotFound.to_string(), "tool not found");
    assert_eq!(unknown().to_string(), "error");
}

#[test]
fn result_carries_job_identity() {
    let result = JobResult::new(&job(2), JobOutcome::Failed { exit_code: 3 });
    assert_eq!(result.index, 2);
    assert_eq!(result.title, "App2");
    assert_eq!(result.output_dir, PathBuf::from("/out"));
    assert!(!result.succeeded());
    assert_eq!(result.exit_code(), Some(3));
}

#[test]
fn exit_code_absent_when_process_never_ran() {
    let result = JobResult::new(&job(1), JobOutcome::ToolNotFound);
    assert_eq!(result.exit_code(), None);
    assert_eq!(JobStatus::from(&result.outcome), JobStatus::ToolNotFound);
}

#[test]
fn outcome_serializes_with_kind_tag() {
    let json = serde_json::to_value(JobOutcome::Failed { exit_code: 2 }).unwrap();
    assert_eq!(json, serde_json::json!({"kind": "failed", "exit_code": 2}));
}
