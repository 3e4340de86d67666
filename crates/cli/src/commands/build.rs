// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `webexe build`: package one launcher executable per URL.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use webexe_adapters::{DesktopNotifyAdapter, NotifyAdapter, ProcessPackager, TracingNotifyAdapter};
use webexe_core::{BuildRequest, SessionState, SystemClock};
use webexe_engine::{EngineConfig, SessionController};

use crate::exit_error::ExitError;
use crate::output::{print_summary, ConsoleObserver, OutputFormat};
use crate::request_file::{expand_home, load_request, read_url_file};

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// URLs to package, one launcher per URL
    pub urls: Vec<String>,

    /// Read URLs from a file, one per line
    #[arg(long, value_name = "FILE")]
    pub urls_file: Option<PathBuf>,

    /// Load the request from a TOML file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Application title [default: App<N> per URL]
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Icon of the packaged executable
    #[arg(long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Icon of the launcher window and taskbar entry
    #[arg(long, value_name = "FILE")]
    pub window_icon: Option<PathBuf>,

    /// HTML splash page shown before the URL opens
    #[arg(long, value_name = "FILE")]
    pub splash: Option<PathBuf>,

    /// Directory that receives the packaged executables
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Open URLs in an embedded browser window instead of the default browser
    #[arg(long)]
    pub embedded: bool,

    /// Bundle a random padding file into every executable
    #[arg(long)]
    pub inflate: bool,

    /// Packaging tool to run [env: WEBEXE_PACKAGER]
    #[arg(long, value_name = "PROGRAM")]
    pub packager: Option<String>,

    /// Packaging processes allowed at once [env: WEBEXE_MAX_JOBS]
    #[arg(long, value_name = "N")]
    pub max_jobs: Option<usize>,

    /// Padding file size in MiB [env: WEBEXE_PADDING_MB]
    #[arg(long, value_name = "MB")]
    pub padding_mb: Option<u64>,

    /// Open the output directory when a job succeeded
    #[arg(long)]
    pub open: bool,

    /// Log notifications instead of showing desktop notifications
    #[arg(long)]
    pub no_notify: bool,
}

impl BuildArgs {
    /// Merge the request file, URL file and flags; flags win.
    pub fn to_request(&self) -> Result<BuildRequest> {
        let mut request = match &self.request {
            Some(path) => load_request(path)?,
            None => BuildRequest::default(),
        };
        if let Some(path) = &self.urls_file {
            request.urls.extend(read_url_file(path)?);
        }
        request.urls.extend(self.urls.iter().cloned());

        let text_fields = [
            (&mut request.title, &self.title),
            (&mut request.version, &self.app_version),
            (&mut request.company, &self.company),
            (&mut request.description, &self.description),
        ];
        for (field, flag) in text_fields {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }

        if let Some(icon) = &self.icon {
            request.icon_path = Some(expand_home(icon));
        }
        if let Some(icon) = &self.window_icon {
            request.window_icon_path = Some(expand_home(icon));
        }
        if let Some(splash) = &self.splash {
            request.splash_html_path = Some(expand_home(splash));
            request.use_splash = true;
        }
        if let Some(dir) = &self.output_dir {
            request.output_dir = expand_home(dir);
        }
        request.use_embedded_browser |= self.embedded;
        request.inflate_size |= self.inflate;
        Ok(request)
    }

    /// Environment defaults with flag overrides applied.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = EngineConfig::from_env()?;
        if let Some(packager) = &self.packager {
            config.packager = packager.clone();
        }
        if let Some(max_jobs) = self.max_jobs {
            config = config.max_jobs(max_jobs);
        }
        if let Some(mb) = self.padding_mb {
            config.padding_mb = mb;
        }
        Ok(config)
    }
}

pub async fn handle(args: BuildArgs, format: OutputFormat) -> Result<()> {
    let request = args.to_request()?;
    let config = args.engine_config()?;
    let state = if args.no_notify {
        run(request, config, TracingNotifyAdapter, format).await?
    } else {
        run(request, config, DesktopNotifyAdapter::new(), format).await?
    };

    print_summary(&state, format)?;
    if args.open {
        open_output(&state);
    }
    match ExitError::from_session(&state) {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

async fn run<N: NotifyAdapter>(
    request: BuildRequest,
    config: EngineConfig,
    notifier: N,
    format: OutputFormat,
) -> Result<SessionState, ExitError> {
    let controller = SessionController::new(ProcessPackager, notifier, SystemClock, config);
    let handle = controller.start(request, ConsoleObserver::new(format)).await?;
    tracing::debug!(queued = handle.queued(), "waiting for jobs");
    Ok(handle.wait().await)
}

fn open_output(state: &SessionState) {
    let Some(dir) = state.open_target() else {
        eprintln!("{}", crate::color::warn("nothing to open: no job succeeded"));
        return;
    };
    if let Err(e) = webexe_adapters::open_dir(dir) {
        eprintln!("{}", crate::color::warn(&format!("cannot open output directory: {e}")));
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
