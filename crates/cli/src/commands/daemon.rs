// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bluedim daemon` - Daemon management commands

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{anyhow, Result};
use bluedim_daemon::Config;
use clap::{Args, Subcommand};

use crate::exit_error::{ExitError, EXIT_FAILURE};
use crate::output::{format_or_json, last_lines, OutputFormat};

/// Marker `bluedimd` logs at the top of every run.
const STARTUP_MARKER: &str = "--- bluedimd: starting";

/// How long `start` waits for a spawned daemon to answer.
const START_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct DaemonArgs {
    #[command(subcommand)]
    pub command: DaemonCommand,
}

#[derive(Subcommand)]
pub enum DaemonCommand {
    /// Start the daemon (foreground or background)
    Start {
        /// Run in foreground, logging to stderr
        #[arg(long)]
        foreground: bool,
    },
    /// Check daemon status
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// View daemon logs
    Logs {
        /// Number of recent lines to show
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

pub async fn daemon(args: DaemonArgs) -> Result<()> {
    match args.command {
        DaemonCommand::Start { foreground } => start(foreground).await,
        DaemonCommand::Status { json } => status(OutputFormat::from_json_flag(json)).await,
        DaemonCommand::Logs { limit } => logs(limit),
    }
}

async fn start(foreground: bool) -> Result<()> {
    let bluedimd = find_bluedimd_binary();

    if foreground {
        let status = Command::new(&bluedimd).env("BLUEDIM_LOG_STDERR", "1").status()?;
        if !status.success() {
            return Err(anyhow!("Daemon exited with status: {}", status));
        }
        return Ok(());
    }

    let client = super::client()?;
    if client.read().await.is_ok() {
        println!("Daemon already running on port {}", client.port().unwrap_or_default());
        return Ok(());
    }

    spawn_detached(&bluedimd)
        .map_err(|e| anyhow!("failed to start {}: {}", bluedimd.display(), e))?;

    let deadline = tokio::time::Instant::now() + START_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if client.read().await.is_ok() {
            println!("Daemon started on port {}", client.port().unwrap_or_default());
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let reason = Config::load()
        .ok()
        .and_then(|config| std::fs::read_to_string(config.log_path).ok())
        .and_then(|log| parse_startup_error(&log))
        .unwrap_or_else(|| "no response within 5s".to_string());
    Err(ExitError::new(EXIT_FAILURE, format!("Daemon failed to start: {reason}")).into())
}

async fn status(format: OutputFormat) -> Result<()> {
    let client = super::client()?;
    let Some(port) = client.port() else {
        let obj = serde_json::json!({ "status": "not_running" });
        return format_or_json(format, &obj, || println!("Daemon not running"));
    };

    match client.read().await {
        Ok(_) => {
            let obj = serde_json::json!({ "status": "running", "port": port });
            format_or_json(format, &obj, || println!("Daemon running on port {port}"))
        }
        Err(e) if e.is_unavailable() => {
            let obj = serde_json::json!({ "status": "stale", "port": port });
            format_or_json(format, &obj, || {
                println!("Daemon not running (stale port record for {port})")
            })
        }
        Err(e) => Err(ExitError::from(e).into()),
    }
}

fn logs(limit: usize) -> Result<()> {
    let config = Config::load().map_err(|e| anyhow!("{}", e))?;
    match std::fs::read_to_string(&config.log_path) {
        Ok(content) => {
            println!("{}", last_lines(&content, limit));
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("No log file found at {}", config.log_path.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn spawn_detached(program: &Path) -> std::io::Result<()> {
    let mut command = Command::new(program);
    command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    command.spawn().map(|_| ())
}

/// `bluedimd` next to the current executable, else from `PATH`.
fn find_bluedimd_binary() -> PathBuf {
    let name = format!("bluedimd{}", std::env::consts::EXE_SUFFIX);
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&name)))
        .filter(|path| path.exists())
        .unwrap_or_else(|| PathBuf::from(name))
}

/// The failure reason from the last run recorded in `log`, if it failed.
fn parse_startup_error(log: &str) -> Option<String> {
    let start = log.rfind(STARTUP_MARKER)?;
    log[start..].lines().find_map(|line| {
        let (_, reason) = line.split_once("startup failed: ")?;
        Some(reason.trim().to_string())
    })
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
