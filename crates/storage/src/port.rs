// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Discovery record for the daemon's listening port.
//!
//! The daemon publishes `{"port": N}` once it is bound; clients resolve the
//! record before every request. A missing or unreadable record means no
//! daemon is known to be running.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::fs::write_atomic;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("port 0 cannot be published")]
    InvalidPort,

    #[error("failed to write port record {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Serialize)]
struct PortRecord {
    port: u16,
}

/// Accepts both `{"port": 4567}` and `{"port": "4567"}`.
#[derive(Deserialize)]
struct LenientRecord {
    port: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct PortRegistry {
    path: PathBuf,
}

impl PortRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replace the record with `port`.
    pub fn publish(&self, port: u16) -> Result<(), RegistryError> {
        if port == 0 {
            return Err(RegistryError::InvalidPort);
        }
        let json = serde_json::to_vec(&PortRecord { port })
            .map_err(|e| RegistryError::Write { path: self.path.clone(), source: e.into() })?;
        write_atomic(&self.path, &json)
            .map_err(|source| RegistryError::Write { path: self.path.clone(), source })
    }

    /// The published port, if a well-formed record exists.
    pub fn resolve(&self) -> Option<u16> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "cannot read port record");
                return None;
            }
        };
        let record: LenientRecord = serde_json::from_slice(&bytes).ok()?;
        let port = match record.port {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse::<u16>().ok(),
            _ => None,
        };
        port.filter(|&p| p != 0)
    }

    /// Remove the record if it still names `port`.
    ///
    /// A record published by a newer daemon is left alone. Returns true when
    /// the file was removed.
    pub fn withdraw(&self, port: u16) -> bool {
        if self.resolve() != Some(port) {
            return false;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to remove port record");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "port_tests.rs"]
mod tests;
