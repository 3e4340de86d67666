// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `webexe script`: print the launcher that `build` would package for a URL.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use webexe_core::{render_launcher, BuildRequest, LauncherScript, LauncherSpec};

use crate::color;
use crate::request_file::expand_home;

#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// URL the launcher opens
    pub url: String,

    /// Window title [default: App1]
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    /// Icon shown in the launcher window and taskbar
    #[arg(long, value_name = "FILE")]
    pub window_icon: Option<PathBuf>,

    /// Open the URL in an embedded browser window
    #[arg(long)]
    pub embedded: bool,

    /// HTML splash page shown before the URL opens
    #[arg(long, value_name = "FILE")]
    pub splash: Option<PathBuf>,

    /// Write the script to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl ScriptArgs {
    fn to_request(&self) -> BuildRequest {
        let mut request = BuildRequest::new([self.url.as_str()], ".")
            .use_embedded_browser(self.embedded)
            .use_splash(self.splash.is_some());
        request.title = self.title.clone().unwrap_or_default();
        request.company = self.company.clone().unwrap_or_default();
        request.window_icon_path = self.window_icon.as_deref().map(expand_home);
        request.splash_html_path = self.splash.as_deref().map(expand_home);
        request
    }
}

pub fn render(args: &ScriptArgs) -> LauncherScript {
    let request = args.to_request();
    let title = request.resolved_title(1);
    let window_icon = request.cleaned_window_icon();
    render_launcher(&LauncherSpec {
        url: &args.url,
        title: &title,
        company: &request.company,
        window_icon: &window_icon,
        use_embedded_browser: request.use_embedded_browser,
        use_splash: request.use_splash,
        splash_html: request.splash_html(),
    })
}

pub fn handle(args: ScriptArgs) -> Result<()> {
    let script = render(&args);
    eprintln!("{}", color::context(&format!("{} launcher", script.variant)));
    match &args.out {
        Some(path) => std::fs::write(path, &script.text)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => print!("{}", script.text),
    }
    Ok(())
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
