// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments for the external packaging tool.
//!
//! The tool is treated as opaque: it is invoked as
//!
//! ```text
//! <tool> --noconfirm --onefile --noconsole <script> --name <title>
//!        [--icon <icon>] --distpath <output_dir>
//!        [--add-data <splash_dir><sep>.]
//!        [--add-data <padding_file><sep>. --noupx]
//! ```

use std::path::Path;

/// Separator between source and destination in `--add-data` values; the
/// host's path-list separator.
pub const DATA_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Inputs for one packaging invocation.
#[derive(Debug, Clone, Copy)]
pub struct PackagerArgs<'a> {
    pub script_path: &'a Path,
    pub title: &'a str,
    pub icon: Option<&'a Path>,
    pub output_dir: &'a Path,
    /// Directory bundled into the artifact root for the splash page
    pub splash_dir: Option<&'a Path>,
    /// Shared padding file bundled to inflate the artifact
    pub padding_file: Option<&'a Path>,
}

/// `--add-data` value placing `src` at the artifact root.
pub fn add_data_arg(src: &Path) -> String {
    format!("{}{}.", src.display(), DATA_SEPARATOR)
}

/// Argument list (program name excluded) in the order the tool expects.
pub fn packager_args(input: &PackagerArgs<'_>) -> Vec<String> {
    let mut args: Vec<String> = ["--noconfirm", "--onefile", "--noconsole"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    args.push(input.script_path.display().to_string());
    args.push("--name".into());
    args.push(input.title.to_string());

    if let Some(icon) = input.icon {
        args.push("--icon".into());
        args.push(icon.display().to_string());
    }

    args.push("--distpath".into());
    args.push(input.output_dir.display().to_string());

    if let Some(dir) = input.splash_dir {
        args.push("--add-data".into());
        args.push(add_data_arg(dir));
    }

    if let Some(padding) = input.padding_file {
        args.push("--add-data".into());
        args.push(add_data_arg(padding));
        args.push("--noupx".into());
    }

    args
}

/// Human-readable command line for the session log. Arguments containing
/// whitespace are double-quoted; this is for display, not for a shell.
pub fn render_command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("\"{arg}\"")
            } else {
                arg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
