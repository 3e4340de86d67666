// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `webexe open`: show an output directory in the file manager.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::request_file::expand_home;

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Directory to open [default: current directory]
    pub dir: Option<PathBuf>,
}

pub fn handle(args: OpenArgs) -> Result<()> {
    let dir = args.dir.as_deref().map(expand_home).unwrap_or_else(|| PathBuf::from("."));
    webexe_adapters::open_dir(&dir)?;
    Ok(())
}
