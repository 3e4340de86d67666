// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and usage output

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    cli().args(&["--help"]).passes().stdout_has("build").stdout_has("open").stdout_has("script");
}

#[test]
fn build_help_mentions_flags() {
    cli()
        .args(&["build", "--help"])
        .passes()
        .stdout_has("--output-dir")
        .stdout_has("--embedded")
        .stdout_has("--inflate")
        .stdout_has("--splash");
}

#[test]
fn version_is_printed() {
    cli().args(&["--version"]).passes().stdout_has("webexe 0.2");
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    cli().fails_with(2).stderr_has("Usage:");
}
