// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon and its clients.

use std::path::PathBuf;
use std::time::Duration;

use crate::lifecycle::LifecycleError;

/// Directory name under the platform runtime and config roots.
pub const APP_DIR: &str = "BlueDim";

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Resolve runtime directory: BLUEDIM_RUNTIME_DIR > XDG runtime dir/BlueDim > temp dir/BlueDim
pub fn runtime_dir() -> PathBuf {
    if let Some(dir) = var("BLUEDIM_RUNTIME_DIR") {
        return PathBuf::from(dir);
    }
    dirs::runtime_dir().unwrap_or_else(std::env::temp_dir).join(APP_DIR)
}

/// Resolve config directory: BLUEDIM_CONFIG_DIR > platform config dir/BlueDim
pub fn config_dir() -> Result<PathBuf, LifecycleError> {
    if let Some(dir) = var("BLUEDIM_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_DIR)).ok_or(LifecycleError::NoConfigDir)
}

/// Default IPC timeout
pub fn ipc_timeout() -> Duration {
    var("BLUEDIM_IPC_TIMEOUT_MS")
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

/// Endpoint `bluedim run` asks for the machine's approximate location
pub fn location_url() -> String {
    var("BLUEDIM_LOCATION_URL").unwrap_or_else(|| "https://ipinfo.io/json".to_string())
}

/// Log to stderr instead of the daemon log file.
pub fn log_stderr() -> bool {
    matches!(var("BLUEDIM_LOG_STDERR").as_deref(), Some("1" | "true"))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
