// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

mod startup;
pub use startup::startup;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use bluedim_storage::{PortRegistry, RegistryError, SettingsStore};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::env;
use crate::listener::ListenCtx;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime directory (port record, daemon log)
    pub runtime_dir: PathBuf,
    /// Directory holding the settings file
    pub config_dir: PathBuf,
    /// Path to the port record
    pub port_path: PathBuf,
    /// Path to the persisted settings
    pub settings_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
}

impl Config {
    /// Load configuration from the environment and platform directories.
    pub fn load() -> Result<Self, LifecycleError> {
        Ok(Self::from_dirs(env::runtime_dir(), env::config_dir()?))
    }

    pub fn from_dirs(runtime_dir: impl Into<PathBuf>, config_dir: impl Into<PathBuf>) -> Self {
        let runtime_dir = runtime_dir.into();
        let config_dir = config_dir.into();
        Self {
            port_path: runtime_dir.join("port.json"),
            log_path: runtime_dir.join("daemon.log"),
            settings_path: config_dir.join("settings.conf"),
            runtime_dir,
            config_dir,
        }
    }

    pub fn registry(&self) -> PortRegistry {
        PortRegistry::new(&self.port_path)
    }
}

/// Daemon state during operation.
///
/// The listener is returned separately from startup to be spawned as a Listener task.
pub struct DaemonState {
    pub config: Config,
    /// Shared by every connection handler
    pub store: Arc<Mutex<SettingsStore>>,
    /// Port this daemon published
    pub port: u16,
    pub start_time: Instant,
}

impl DaemonState {
    pub fn listen_ctx(&self) -> Arc<ListenCtx> {
        Arc::new(ListenCtx { store: Arc::clone(&self.store) })
    }

    /// Withdraw the port record so clients stop resolving this daemon.
    pub fn shutdown(&self) {
        let uptime = self.start_time.elapsed().as_secs();
        if self.config.registry().withdraw(self.port) {
            info!(port = self.port, uptime_secs = uptime, "port record withdrawn, daemon stopped");
        } else {
            info!(port = self.port, uptime_secs = uptime, "port record already replaced, daemon stopped");
        }
    }
}

/// Result of daemon startup - includes both the daemon state and the listener.
pub struct StartupResult {
    pub daemon: DaemonState,
    /// Bound loopback listener to hand to a [`Listener`](crate::Listener)
    pub listener: TcpListener,
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to bind {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    #[error("Failed to publish port: {0}")]
    PublishFailed(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
