// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launcher script persistence and job planning.

use crate::config::EngineConfig;
use crate::error::JobError;
use std::path::Path;
use webexe_core::{
    packager_args, render_launcher, BuildJob, BuildRequest, LauncherSpec, LauncherVariant,
    PackagerArgs,
};

pub fn write_script(path: &Path, text: &str) -> Result<(), JobError> {
    std::fs::write(path, text)
        .map_err(|source| JobError::ScriptWrite { path: path.to_path_buf(), source })
}

/// Delete a launcher script; a missing file counts as removed.
pub fn remove_script(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// A job ready to run, plus which launcher it packages.
#[derive(Debug, Clone)]
pub struct PlannedJob {
    pub job: BuildJob,
    pub variant: LauncherVariant,
}

/// Generate and persist the launcher for the URL at 1-based `index`, then
/// derive the packaging arguments.
pub fn plan_job(
    request: &BuildRequest,
    index: usize,
    url: &str,
    config: &EngineConfig,
    padding: Option<&Path>,
) -> Result<PlannedJob, JobError> {
    let title = request.resolved_title(index);
    let window_icon = request.cleaned_window_icon();
    let launcher = LauncherSpec {
        url,
        title: &title,
        company: &request.company,
        window_icon: &window_icon,
        use_embedded_browser: request.use_embedded_browser,
        use_splash: request.use_splash,
        splash_html: request.splash_html(),
    };
    let script = render_launcher(&launcher);
    let script_path = config.script_path(index);
    write_script(&script_path, &script.text)?;

    let splash_dir = script.splash_dir(&launcher);
    let args = packager_args(&PackagerArgs {
        script_path: &script_path,
        title: &title,
        icon: request.icon(),
        output_dir: &request.output_dir,
        splash_dir: splash_dir.as_deref(),
        padding_file: padding,
    });
    tracing::debug!(
        job = index,
        %title,
        variant = %script.variant,
        path = %script_path.display(),
        "launcher script written"
    );

    Ok(PlannedJob {
        job: BuildJob {
            index,
            title,
            url: url.to_string(),
            script_path,
            args,
            output_dir: request.output_dir.clone(),
        },
        variant: script.variant,
    })
}

#[cfg(test)]
#[path = "scripts_tests.rs"]
mod tests;
