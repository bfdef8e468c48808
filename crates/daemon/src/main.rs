// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bluedimd`: the settings daemon.

use std::process::ExitCode;

use bluedim_core::default_schema;
use bluedim_daemon::{logging, startup, Config, Listener, StartupResult};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("bluedimd: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("bluedimd: cannot open log {}: {e}", config.log_path.display());
            return ExitCode::FAILURE;
        }
    };

    info!("--- bluedimd: starting (pid: {}) ---", std::process::id());

    let StartupResult { daemon, listener, port } = match startup(&config, default_schema()).await
    {
        Ok(result) => result,
        Err(e) => {
            error!("startup failed: {e}");
            eprintln!("bluedimd: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(port, settings = %config.settings_path.display(), "daemon ready");

    let listener = Listener::new(listener, daemon.listen_ctx());
    tokio::select! {
        _ = listener.run() => {}
        _ = shutdown_signal() => info!("shutdown signal received"),
    }

    daemon.shutdown();
    ExitCode::SUCCESS
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    if let Err(e) = wait_for_signal().await {
        warn!("cannot install signal handlers: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
