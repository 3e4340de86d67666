// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::PathBuf;
use std::time::Instant;
use webexe_core::{Event, JobOutcome, JobResult, ValidationError};

fn finished(outcomes: &[JobOutcome]) -> SessionState {
    let mut state = SessionState::begin(Instant::now());
    for (i, outcome) in outcomes.iter().enumerate() {
        let index = i + 1;
        state.apply(&Event::JobQueued {
            index,
            title: format!("App{index}"),
            url: "https://example.com".into(),
        });
        state.apply(&Event::JobExited {
            result: JobResult {
                index,
                title: format!("App{index}"),
                outcome: outcome.clone(),
                output_dir: PathBuf::from("/out"),
            },
        });
    }
    state
}

#[yare::parameterized(
    all_succeeded = { &[JobOutcome::Succeeded, JobOutcome::Succeeded], None },
    one_failed = {
        &[JobOutcome::Succeeded, JobOutcome::Failed { exit_code: 2 }],
        Some(codes::JOB_FAILED)
    },
    errored = { &[JobOutcome::UnknownError { message: "boom".into() }], Some(codes::JOB_FAILED) },
    tool_missing_wins = {
        &[JobOutcome::Failed { exit_code: 1 }, JobOutcome::ToolNotFound],
        Some(codes::TOOL_NOT_FOUND)
    },
)]
fn exit_code_from_outcomes(outcomes: &[JobOutcome], expected: Option<i32>) {
    assert_eq!(ExitError::from_session(&finished(outcomes)).map(|e| e.code), expected);
}

#[test]
fn failure_message_counts_jobs() {
    let state = finished(&[JobOutcome::Succeeded, JobOutcome::Failed { exit_code: 2 }]);
    assert_eq!(ExitError::from_session(&state).unwrap().to_string(), "1 of 2 job(s) failed");
}

#[test]
fn skipped_job_fails_an_otherwise_successful_session() {
    let mut state = SessionState::begin(Instant::now());
    state.apply(&Event::JobSkipped {
        index: 1,
        title: "App1".into(),
        message: "cannot write launcher script".into(),
    });
    state.apply(&Event::JobQueued { index: 2, title: "App2".into(), url: "https://b.test".into() });
    state.apply(&Event::JobExited {
        result: JobResult {
            index: 2,
            title: "App2".into(),
            outcome: JobOutcome::Succeeded,
            output_dir: PathBuf::from("/out"),
        },
    });
    state.apply(&Event::JobCleaned { index: 2 });
    state.apply(&Event::JobsSubmitted { count: 1 });

    let err = ExitError::from_session(&state).unwrap();
    assert_eq!(err.code, codes::JOB_FAILED);
    assert_eq!(err.to_string(), "1 of 2 job(s) failed");
}

#[test]
fn no_jobs_is_a_failure() {
    let state = SessionState::begin(Instant::now());
    assert_eq!(ExitError::from_session(&state).unwrap().code, codes::JOB_FAILED);
}

#[test]
fn setup_errors_are_code_two() {
    let err = ExitError::from(SessionError::from(ValidationError::NoOutputDir));
    assert_eq!(err.code, codes::SETUP_FAILED);
    assert_eq!(err.message, "choose an output directory");
}
