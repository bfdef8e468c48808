// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! How clients see a missing or departed daemon

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn no_port_record_is_not_running() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::from_dirs(dir.path().join("run"), dir.path().join("conf"));
    let client = DaemonClient::new(config.registry(), IPC_TIMEOUT);

    let err = client.read().await.unwrap_err();

    assert!(matches!(err, ClientError::NotRunning), "got {err:?}");
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn stopped_daemon_withdraws_its_port() {
    let daemon = Daemon::start(dim_schema()).await;
    let client = daemon.client();
    assert!(client.port().is_some());

    let _dir = daemon.stop().await;

    assert_eq!(client.port(), None);
    assert!(matches!(client.read().await, Err(ClientError::NotRunning)));
}

#[tokio::test]
async fn stale_port_record_is_unavailable() {
    let daemon = Daemon::start(dim_schema()).await;
    let port_path = daemon.config.port_path.clone();
    let contents = std::fs::read(&port_path).unwrap();
    let dir = daemon.stop().await;
    // Simulate a crash that left the record behind
    std::fs::write(&port_path, contents).unwrap();

    let config = Config::from_dirs(dir.path().join("run"), dir.path().join("conf"));
    let err = DaemonClient::new(config.registry(), IPC_TIMEOUT).read().await.unwrap_err();

    assert!(matches!(err, ClientError::Unavailable { .. }), "got {err:?}");
    assert!(err.is_unavailable());
}
