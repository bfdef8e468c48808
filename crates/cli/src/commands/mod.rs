// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod daemon;
pub mod run;
pub mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::DaemonClient;
use crate::exit_error::{ExitError, EXIT_FAILURE};

#[derive(Parser)]
#[command(name = "bluedim", version, about = "Shift screen colour and brightness with the sun")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage the settings daemon
    Daemon(daemon::DaemonArgs),
    /// Show settings
    Get(settings::GetArgs),
    /// Change settings
    Set(settings::SetArgs),
    /// Run the display controller in the foreground
    Run(run::RunArgs),
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Daemon(args) => daemon::daemon(args).await,
        Command::Get(args) => settings::get(args).await,
        Command::Set(args) => settings::set(args).await,
        Command::Run(args) => run::run(args).await,
    }
}

fn client() -> Result<DaemonClient> {
    DaemonClient::from_env().map_err(|e| ExitError::new(EXIT_FAILURE, e.to_string()).into())
}
