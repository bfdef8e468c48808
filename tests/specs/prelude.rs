// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test harness.

use std::time::Duration;

pub use bluedim::{ClientError, DaemonClient};
pub use bluedim_core::{Changes, Schema, Settings, Value};
pub use bluedim_daemon::Config;
pub use serde_json::json;

use bluedim_daemon::{startup, DaemonState, Listener};
use bluedim_wire::{frame, read_message};
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

pub const IPC_TIMEOUT: Duration = Duration::from_secs(2);

/// A running in-process daemon rooted in its own temp directory.
pub struct Daemon {
    pub dir: TempDir,
    pub config: Config,
    pub state: DaemonState,
    listener: JoinHandle<()>,
}

impl Daemon {
    pub async fn start(schema: Schema) -> Self {
        let dir = tempfile::tempdir().unwrap();
        Self::start_in(dir, schema).await
    }

    /// Start on an existing directory, reusing whatever settings it holds.
    pub async fn start_in(dir: TempDir, schema: Schema) -> Self {
        let config = Config::from_dirs(dir.path().join("run"), dir.path().join("conf"));
        let result = startup(&config, schema).await.unwrap();
        let listener = tokio::spawn(Listener::new(result.listener, result.daemon.listen_ctx()).run());
        Self { dir, config, state: result.daemon, listener }
    }

    pub fn client(&self) -> DaemonClient {
        DaemonClient::new(self.config.registry(), IPC_TIMEOUT)
    }

    pub fn port(&self) -> u16 {
        self.state.port
    }

    pub fn settings_file(&self) -> String {
        std::fs::read_to_string(&self.config.settings_path).unwrap()
    }

    /// Send one raw payload in a frame and return the decoded JSON reply.
    pub async fn raw(&self, payload: &[u8]) -> serde_json::Value {
        let mut stream = TcpStream::connect(("127.0.0.1", self.port())).await.unwrap();
        stream.write_all(&frame(payload).unwrap()).await.unwrap();
        let reply = tokio::time::timeout(IPC_TIMEOUT, read_message(&mut stream))
            .await
            .unwrap()
            .unwrap();
        serde_json::from_slice(&reply).unwrap()
    }

    /// Stop accepting, withdraw the port record and hand back the directory.
    pub async fn stop(self) -> TempDir {
        self.listener.abort();
        let _ = self.listener.await;
        self.state.shutdown();
        self.dir
    }
}

/// Schema with a single `display.dim_percent` float.
pub fn dim_schema() -> Schema {
    Schema::builder().option("display", "dim_percent", 0.3).build()
}
