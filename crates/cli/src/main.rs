// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! webexe: turn web URLs into desktop launcher executables

mod color;
mod commands;
mod exit_error;
mod logging;
mod output;
mod request_file;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{build, open, script};
use exit_error::{codes, ExitError};
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "webexe",
    version,
    about = "Package web URLs into desktop launcher executables",
    styles = color::styles()
)]
struct Cli {
    /// Output format for session events and the summary
    #[arg(long, value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package one launcher executable per URL
    Build(build::BuildArgs),
    /// Show a directory in the file manager
    Open(open::OpenArgs),
    /// Print the launcher script generated for a URL
    Script(script::ScriptArgs),
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build(args) => build::handle(args, cli.output).await,
        Commands::Open(args) => open::handle(args),
        Commands::Script(args) => script::handle(args),
    }
}

#[tokio::main]
async fn main() {
    let guard = logging::init();
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{} {err:#}", color::error("error:"));
            err.downcast_ref::<ExitError>().map_or(codes::SETUP_FAILED, |e| e.code)
        }
    };
    drop(guard);
    if code != 0 {
        std::process::exit(code);
    }
}
