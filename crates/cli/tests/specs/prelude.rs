// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: a fluent wrapper over `assert_cmd` and a scratch
//! workspace with a scripted stand-in for the packaging tool.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Stand-in packaging tool. Prints a line per stream, fails with exit code 4
/// when `--name` equals `$FAKE_FAIL_NAME`, and otherwise creates an empty
/// artifact named after the title in `--distpath`.
#[cfg(unix)]
const FAKE_PACKAGER: &str = r#"#!/bin/sh
name=""
dist=""
while [ $# -gt 0 ]; do
  case "$1" in
    --name) name="$2"; shift ;;
    --distpath) dist="$2"; shift ;;
  esac
  shift
done
echo "building $name"
echo "note from $name" >&2
if [ -n "$FAKE_FAIL_NAME" ] && [ "$name" = "$FAKE_FAIL_NAME" ]; then
  exit 4
fi
mkdir -p "$dist" && : > "$dist/$name"
"#;

pub fn cli() -> CliBuilder {
    let mut cmd = Command::cargo_bin("webexe").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("COLOR").env_remove("WEBEXE_LOG");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Point the packager, temp dir and padding size at `ws`.
    pub fn in_workspace(self, ws: &Workspace) -> Self {
        self.env("WEBEXE_PACKAGER", &ws.packager)
            .env("WEBEXE_TEMP_DIR", ws.temp_dir())
            .env("WEBEXE_PADDING_MB", "1")
            .env("WEBEXE_MAX_JOBS", "2")
    }

    pub fn run(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        RunAssert {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    pub fn passes(self) -> RunAssert {
        self.run().code_is(0)
    }

    pub fn fails_with(self, code: i32) -> RunAssert {
        self.run().code_is(code)
    }
}

pub struct RunAssert {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunAssert {
    fn code_is(self, expected: i32) -> Self {
        assert_eq!(
            self.code,
            Some(expected),
            "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout lacks {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr lacks {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout.lines().map(|l| serde_json::from_str(l).unwrap()).collect()
    }
}

/// Scratch directories plus the fake packaging tool.
pub struct Workspace {
    dir: TempDir,
    pub packager: PathBuf,
}

impl Workspace {
    #[cfg(unix)]
    pub fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let packager = dir.path().join("fake-packager");
        std::fs::write(&packager, FAKE_PACKAGER).unwrap();
        std::fs::set_permissions(&packager, std::fs::Permissions::from_mode(0o755)).unwrap();
        std::fs::create_dir(dir.path().join("tmp")).unwrap();
        Self { dir, packager }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.path().join("tmp")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    pub fn file(&self, name: &str, text: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    /// Names of files left in the temp dir
    pub fn temp_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.temp_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
