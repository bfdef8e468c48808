// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

fn schema() -> Schema {
    Schema::builder()
        .option("display", "day_temp", 6000)
        .option("display", "dim_percent", 0.4)
        .option("display", "output", "")
        .option("controller", "enabled", true)
        .build()
}

#[test]
fn load_creates_missing_file_and_parents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("BlueDim").join("settings.conf");

    let store = SettingsStore::open(&path, schema());

    assert_eq!(store.snapshot(), schema().defaults());
    assert!(store.is_persisting());
    let text = std::fs::read_to_string(&path).unwrap();
    similar_asserts::assert_eq!(
        text,
        "[display]\nday_temp = 6000\ndim_percent = 0.4\noutput = \n\n[controller]\nenabled = true\n\n"
    );
}

#[test]
fn load_restores_values_and_prunes_unknown_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.conf");
    std::fs::write(
        &path,
        "\
[display]
day_temp = 5200
stale_option = 1

[obsolete]
x = y
",
    )
    .unwrap();

    let mut store = SettingsStore::new(&path, schema());
    let report = store.load();

    assert_eq!(report, LoadReport { restored: 1, rejected: 0, pruned: 2, skipped_lines: 0 });
    assert_eq!(store.snapshot().get("display", "day_temp"), Some(&Value::Int(5200)));
    assert_eq!(store.snapshot().keys(), schema().defaults().keys());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("obsolete"));
    assert!(!text.contains("stale_option"));
    assert!(text.contains("enabled = true"));
}

#[test]
fn load_discards_values_of_the_wrong_kind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.conf");
    std::fs::write(&path, "[display]\nday_temp = warm\ndim_percent = 0.25\n").unwrap();

    let mut store = SettingsStore::new(&path, schema());
    let report = store.load();

    assert_eq!(report.rejected, 1);
    assert_eq!(report.restored, 1);
    let state = store.snapshot();
    assert_eq!(state.get("display", "day_temp"), Some(&Value::Int(6000)));
    assert_eq!(state.get("display", "dim_percent"), Some(&Value::Float(0.25)));
}

#[test]
fn load_keeps_previous_value_when_file_value_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.conf");
    let mut store = SettingsStore::open(&path, schema());
    store.apply_changes(&Changes::new().set("display", "day_temp", 4800));

    std::fs::write(&path, "[display]\nday_temp = ???\n").unwrap();
    store.load();

    assert_eq!(store.snapshot().get("display", "day_temp"), Some(&Value::Int(4800)));
}

#[test]
fn load_tolerates_garbage_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.conf");
    std::fs::write(&path, [0xff, 0xfe, 0x00, b'[', b'\n', 0x80]).unwrap();

    let store = SettingsStore::open(&path, schema());

    assert_eq!(store.snapshot(), schema().defaults());
}

#[test]
fn reconciliation_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.conf");
    std::fs::write(
        &path,
        "# hand edited\n[display]\ndim_percent: 0.55\nday_temp = nope\n[extra]\nk = v\n",
    )
    .unwrap();

    let mut store = SettingsStore::new(&path, schema());
    store.load();
    let first_state = store.snapshot();
    let first_bytes = std::fs::read(&path).unwrap();

    store.load();
    let second_bytes = std::fs::read(&path).unwrap();

    assert_eq!(store.snapshot(), first_state);
    similar_asserts::assert_eq!(
        String::from_utf8(first_bytes).unwrap(),
        String::from_utf8(second_bytes).unwrap()
    );

    let reopened = SettingsStore::open(&path, schema());
    assert_eq!(reopened.snapshot(), first_state);
}

#[test]
fn apply_changes_rejects_mismatched_kind() {
    let dir = tempdir().unwrap();
    let mut store = SettingsStore::open(dir.path().join("settings.conf"), schema());

    let applied = store.apply_changes(&Changes::new().set("display", "day_temp", "not-a-number"));

    assert_eq!(applied, 0);
    assert_eq!(store.snapshot().get("display", "day_temp"), Some(&Value::Int(6000)));
}

#[test]
fn apply_changes_is_partial_and_silent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.conf");
    let mut store = SettingsStore::open(&path, schema());

    let changes = Changes::new()
        .set("display", "day_temp", 7000)
        .set("display", "unknown", 1)
        .set("bogus", "x", 1)
        .set("controller", "enabled", false);
    let applied = store.apply_changes(&changes);

    assert_eq!(applied, 2);
    let state = store.snapshot();
    assert_eq!(state.get("display", "day_temp"), Some(&Value::Int(7000)));
    assert_eq!(state.get("controller", "enabled"), Some(&Value::Bool(false)));
    assert_eq!(state.keys(), schema().defaults().keys());

    let reopened = SettingsStore::open(&path, schema());
    assert_eq!(reopened.snapshot(), state);
}

#[test]
fn apply_changes_rejects_strings_that_cannot_be_persisted() {
    let dir = tempdir().unwrap();
    let mut store = SettingsStore::open(dir.path().join("settings.conf"), schema());

    let applied = store.apply_changes(&Changes::new().set("display", "output", "HDMI-1\n[evil]"));

    assert_eq!(applied, 0);
    assert_eq!(store.snapshot().get("display", "output"), Some(&Value::from("")));
}

#[test]
fn snapshot_is_a_copy() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::open(dir.path().join("settings.conf"), schema());

    let mut copy = store.snapshot();
    copy.insert("display", "day_temp", 1);

    assert_eq!(store.snapshot().get("display", "day_temp"), Some(&Value::Int(6000)));
}

#[test]
fn unwritable_location_degrades_to_memory_only() {
    let dir = tempdir().unwrap();
    // A regular file where the config directory should be
    let blocker = dir.path().join("BlueDim");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let mut store = SettingsStore::open(blocker.join("settings.conf"), schema());
    assert!(!store.is_persisting());
    assert_eq!(store.snapshot(), schema().defaults());

    let applied = store.apply_changes(&Changes::new().set("display", "dim_percent", 0.1));
    assert_eq!(applied, 1);
    assert_eq!(store.snapshot().get("display", "dim_percent"), Some(&Value::Float(0.1)));
    assert!(!store.is_persisting());
}
