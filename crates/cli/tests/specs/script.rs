// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `webexe script` previews

use crate::prelude::*;

#[test]
fn prints_system_browser_launcher() {
    cli()
        .args(&["script", "https://example.com"])
        .passes()
        .stdout_has("https://example.com")
        .stderr_has("system browser launcher");
}

#[test]
fn embedded_launcher_is_titled() {
    cli()
        .args(&["script", "https://example.com", "--embedded", "--title", "Portal"])
        .passes()
        .stdout_has("\"Portal\"")
        .stderr_has("embedded browser launcher");
}
