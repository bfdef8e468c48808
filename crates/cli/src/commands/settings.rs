// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bluedim get` / `bluedim set`

use anyhow::Result;
use bluedim_core::{Changes, Settings, Value};
use clap::Args;

use crate::exit_error::{ExitError, EXIT_FAILURE};
use crate::output::{format_or_json, settings_text, OutputFormat};

#[derive(Args)]
pub struct GetArgs {
    /// `section` or `section.option`; everything when omitted
    pub key: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SetArgs {
    /// Assignments like `display.dim_percent=0.5`
    #[arg(required = true, value_name = "SECTION.OPTION=VALUE")]
    pub assignments: Vec<String>,
}

/// What a `get` key selects.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    All(Settings),
    Section(String, Settings),
    Option(Value),
}

pub async fn get(args: GetArgs) -> Result<()> {
    let state = super::client()?.read().await.map_err(ExitError::from)?;
    let format = OutputFormat::from_json_flag(args.json);

    match select(&state, args.key.as_deref())? {
        Selection::All(settings) | Selection::Section(_, settings) => {
            format_or_json(format, &settings, || println!("{}", settings_text(&settings)))
        }
        Selection::Option(value) => format_or_json(format, &value, || println!("{value}")),
    }
}

pub async fn set(args: SetArgs) -> Result<()> {
    let client = super::client()?;
    let state = client.read().await.map_err(ExitError::from)?;

    let mut parsed = Vec::with_capacity(args.assignments.len());
    for text in &args.assignments {
        parsed.push(parse_assignment(text)?);
    }
    let changes = build_changes(&state, &parsed)?;

    client.write(&changes).await.map_err(ExitError::from)?;
    for (section, option, value) in changes.entries() {
        println!("{section}.{option} = {value}");
    }
    Ok(())
}

pub fn select(state: &Settings, key: Option<&str>) -> Result<Selection, ExitError> {
    let Some(key) = key else {
        return Ok(Selection::All(state.clone()));
    };
    match key.split_once('.') {
        None => {
            let options = state.section(key).ok_or_else(|| unknown(key))?;
            let mut section = Settings::new();
            for (option, value) in options {
                section.insert(key, option, value.clone());
            }
            Ok(Selection::Section(key.to_string(), section))
        }
        Some((section, option)) => state
            .get(section, option)
            .cloned()
            .map(Selection::Option)
            .ok_or_else(|| unknown(key)),
    }
}

/// Split `section.option=value`.
pub fn parse_assignment(text: &str) -> Result<(String, String, String), ExitError> {
    let malformed = || ExitError::usage(format!("expected SECTION.OPTION=VALUE, got {text:?}"));
    let (key, value) = text.split_once('=').ok_or_else(malformed)?;
    let (section, option) = key.trim().split_once('.').ok_or_else(malformed)?;
    if section.is_empty() || option.is_empty() {
        return Err(malformed());
    }
    Ok((section.to_string(), option.to_string(), value.to_string()))
}

/// Parse each value as the kind the option currently has.
///
/// Unknown keys and unparsable values fail the whole batch before anything
/// is sent.
pub fn build_changes(
    state: &Settings,
    assignments: &[(String, String, String)],
) -> Result<Changes, ExitError> {
    let mut changes = Changes::new();
    for (section, option, text) in assignments {
        let current = state
            .get(section, option)
            .ok_or_else(|| unknown(&format!("{section}.{option}")))?;
        let value = Value::parse_as(current.kind(), text).map_err(|e| {
            ExitError::new(EXIT_FAILURE, format!("invalid value for {section}.{option}: {e}"))
        })?;
        changes = changes.set(section, option, value);
    }
    Ok(changes)
}

fn unknown(key: &str) -> ExitError {
    ExitError::new(EXIT_FAILURE, format!("unknown setting: {key}"))
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
