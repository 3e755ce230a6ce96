// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! bindle CLI - bundles a CommonJS module graph into a single script

use bindle_pack::{bundle, VERSION};
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bindle",
    about = "Bundle a CommonJS module graph into one self-loading script",
    version = VERSION,
    author = "Pegasus Heavy Industries"
)]
struct Cli {
    /// Entry source file; the module graph is discovered from here
    #[arg(short = 'e', long = "entry")]
    entry: PathBuf,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("bindle_pack=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("bindle_pack=warn")
            .init();
    }

    // The bundle is rendered in memory first, so a failed run never
    // leaves partial output on stdout.
    match bundle(&cli.entry) {
        Ok(output) => {
            std::io::stdout().write_all(output.as_bytes())?;
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
