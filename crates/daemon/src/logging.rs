// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon log setup.

use std::fs::OpenOptions;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::env;
use crate::lifecycle::{Config, LifecycleError};

/// Install the global subscriber.
///
/// Logs go to `config.log_path` (appending) unless `BLUEDIM_LOG_STDERR` is
/// set. `RUST_LOG` overrides the default `info` level. Keep the returned
/// guard alive for the life of the process or buffered lines are lost.
pub fn init(config: &Config) -> Result<WorkerGuard, LifecycleError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, guard) = if env::log_stderr() {
        tracing_appender::non_blocking(std::io::stderr())
    } else {
        std::fs::create_dir_all(&config.runtime_dir)?;
        let file = OpenOptions::new().create(true).append(true).open(&config.log_path)?;
        tracing_appender::non_blocking(file)
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
    Ok(guard)
}
