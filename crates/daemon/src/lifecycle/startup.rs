// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup and initialization logic.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use bluedim_core::Schema;
use bluedim_storage::SettingsStore;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tracing::info;

use super::{Config, DaemonState, LifecycleError, StartupResult};

/// Start the daemon: load settings, bind an ephemeral loopback port, then
/// publish it.
///
/// The port record is only written once the listener is bound, so a
/// published port is always valid at publish time.
pub async fn startup(config: &Config, schema: Schema) -> Result<StartupResult, LifecycleError> {
    std::fs::create_dir_all(&config.runtime_dir)?;

    let store = SettingsStore::open(&config.settings_path, schema);

    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 0));
    let listener =
        TcpListener::bind(addr).await.map_err(|e| LifecycleError::BindFailed(addr, e))?;
    let port = listener.local_addr().map_err(|e| LifecycleError::BindFailed(addr, e))?.port();

    config.registry().publish(port)?;
    info!(port, path = %config.port_path.display(), "listening");

    let daemon = DaemonState {
        config: config.clone(),
        store: Arc::new(Mutex::new(store)),
        port,
        start_time: Instant::now(),
    };
    Ok(StartupResult { daemon, listener, port })
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
