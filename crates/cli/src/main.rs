// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bluedim`: command-line client for the settings daemon.

use std::process::ExitCode;

use bluedim::commands::{dispatch, Cli};
use bluedim::exit_error::{ExitError, EXIT_FAILURE};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = match err.downcast_ref::<ExitError>() {
                Some(exit) => {
                    if !exit.message.is_empty() {
                        eprintln!("Error: {}", exit.message);
                    }
                    exit.code
                }
                None => {
                    eprintln!("Error: {err:#}");
                    EXIT_FAILURE
                }
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
