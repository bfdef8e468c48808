// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settings survive restarts and follow schema changes

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn first_start_writes_defaults() {
    let daemon = Daemon::start(dim_schema()).await;

    assert_eq!(daemon.settings_file(), "[display]\ndim_percent = 0.3\n\n");
}

#[tokio::test]
async fn written_values_survive_restart() {
    let daemon = Daemon::start(dim_schema()).await;
    daemon.client().write(&Changes::new().set("display", "dim_percent", 0.5)).await.unwrap();
    let dir = daemon.stop().await;

    let daemon = Daemon::start_in(dir, dim_schema()).await;

    let state = daemon.client().read().await.unwrap();
    assert_eq!(state.get("display", "dim_percent"), Some(&Value::Float(0.5)));
}

#[tokio::test]
async fn restart_with_new_schema_prunes_and_adds() {
    let old = Schema::builder()
        .option("display", "dim_percent", 0.3)
        .option("legacy", "mode", "old")
        .build();
    let daemon = Daemon::start(old).await;
    daemon.client().write(&Changes::new().set("display", "dim_percent", 0.7)).await.unwrap();
    let dir = daemon.stop().await;

    let new = Schema::builder()
        .option("display", "dim_percent", 0.3)
        .option("display", "enabled", true)
        .build();
    let daemon = Daemon::start_in(dir, new).await;

    let state = daemon.client().read().await.unwrap();
    let mut expected = Settings::new();
    expected.insert("display", "dim_percent", 0.7);
    expected.insert("display", "enabled", true);
    assert_eq!(state, expected);
    assert!(!daemon.settings_file().contains("legacy"));
}
