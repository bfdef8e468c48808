// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreground controller: turns daemon settings and the sun's position into
//! display gamma and brightness.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bluedim_core::defaults::{CONTROLLER, DISPLAY, LOCATION};
use bluedim_core::{night_shift_for, solar, Appearance, Clock, Settings};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::client::DaemonClient;
use crate::locate::Locator;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed { program: String, status: std::process::ExitStatus, stderr: String },

    #[error("no connected output found")]
    NoOutput,
}

/// Something that can show an [`Appearance`].
#[async_trait]
pub trait DisplayBackend: Send {
    /// Apply to `output`, or to the backend's own choice when `None`.
    async fn apply(
        &mut self,
        output: Option<&str>,
        appearance: &Appearance,
    ) -> Result<(), DisplayError>;
}

/// Drives X11 outputs through the `xrandr` command.
#[derive(Debug, Clone)]
pub struct XrandrDisplay {
    program: PathBuf,
}

impl Default for XrandrDisplay {
    fn default() -> Self {
        Self { program: PathBuf::from("xrandr") }
    }
}

impl XrandrDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run(&self, args: &[String]) -> Result<String, DisplayError> {
        let program = self.program.display().to_string();
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|source| DisplayError::Spawn { program: program.clone(), source })?;
        if !output.status.success() {
            return Err(DisplayError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl DisplayBackend for XrandrDisplay {
    async fn apply(
        &mut self,
        output: Option<&str>,
        appearance: &Appearance,
    ) -> Result<(), DisplayError> {
        let output = match output {
            Some(name) => name.to_string(),
            None => first_connected_output(&self.run(&["--query".to_string()]).await?)
                .ok_or(DisplayError::NoOutput)?,
        };
        let args = xrandr_args(&output, appearance);
        debug!(args = ?args, "running xrandr");
        self.run(&args).await.map(|_| ())
    }
}

/// Logs what it would apply and remembers it.
#[derive(Debug, Default)]
pub struct DryRunDisplay {
    pub applied: Vec<(Option<String>, Appearance)>,
}

#[async_trait]
impl DisplayBackend for DryRunDisplay {
    async fn apply(
        &mut self,
        output: Option<&str>,
        appearance: &Appearance,
    ) -> Result<(), DisplayError> {
        info!(
            output = output.unwrap_or("<auto>"),
            temperature = appearance.temperature.round(),
            brightness = appearance.brightness,
            "dry run: would apply"
        );
        self.applied.push((output.map(str::to_string), *appearance));
        Ok(())
    }
}

/// Arguments for `xrandr` to set gains and brightness on `output`.
pub fn xrandr_args(output: &str, appearance: &Appearance) -> Vec<String> {
    vec![
        "--output".to_string(),
        output.to_string(),
        "--gamma".to_string(),
        format!("{:.3}:{:.3}:{:.3}", appearance.red, appearance.green, appearance.blue),
        "--brightness".to_string(),
        format!("{:.3}", appearance.brightness),
    ]
}

/// First output `xrandr --query` lists as connected.
pub fn first_connected_output(query: &str) -> Option<String> {
    query.lines().find_map(|line| {
        let mut words = line.split_whitespace();
        let name = words.next()?;
        (words.next() == Some("connected")).then(|| name.to_string())
    })
}

/// Outcome of one controller step.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Applied { elevation: f64, shift: f64, appearance: Appearance },
    /// `controller.enabled` is false
    Disabled,
}

pub struct Controller<C: Clock, D: DisplayBackend> {
    client: DaemonClient,
    clock: C,
    display: D,
    /// Last settings the daemon returned, or schema defaults
    settings: Settings,
    locator: Option<Locator>,
}

impl<C: Clock, D: DisplayBackend> Controller<C, D> {
    pub fn new(client: DaemonClient, clock: C, display: D, defaults: Settings) -> Self {
        Self { client, clock, display, settings: defaults, locator: None }
    }

    /// Detect the location when none is configured and `location.auto` is on.
    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Time to wait between ticks; never less than one second.
    pub fn interval(&self) -> Duration {
        let secs = self.settings.i64_or(CONTROLLER, "interval_secs", 60).max(1);
        Duration::from_secs(secs.unsigned_abs())
    }

    /// Refresh settings from the daemon and apply the current appearance.
    ///
    /// An unreachable daemon is not an error: the last known settings stay
    /// in effect.
    pub async fn tick(&mut self) -> Result<Tick, DisplayError> {
        match self.client.read().await {
            Ok(settings) => self.settings = settings,
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "daemon unavailable, keeping last known settings")
            }
            Err(e) => warn!(error = %e, "cannot read settings, keeping last known settings"),
        }

        if !self.settings.bool_or(CONTROLLER, "enabled", true) {
            debug!("controller disabled, skipping");
            return Ok(Tick::Disabled);
        }

        let (latitude, longitude) = self.coordinates().await;
        let elevation = solar::elevation(latitude, longitude, self.clock.now());
        let shift = night_shift_for(&self.settings, elevation);
        let appearance = Appearance::blend(&self.settings, shift);

        let output = self.settings.str_or(DISPLAY, "output", "");
        let output = (!output.is_empty()).then_some(output);
        self.display.apply(output, &appearance).await?;

        debug!(elevation, shift, temperature = appearance.temperature, "applied");
        Ok(Tick::Applied { elevation, shift, appearance })
    }

    /// Configured latitude and longitude, unless both are zero (unset) and a
    /// locator can detect them. A failed lookup falls back to the settings.
    async fn coordinates(&mut self) -> (f64, f64) {
        let latitude = self.settings.f64_or(LOCATION, "latitude", 0.0);
        let longitude = self.settings.f64_or(LOCATION, "longitude", 0.0);
        let unset = latitude == 0.0 && longitude == 0.0;
        if unset && self.settings.bool_or(LOCATION, "auto", true) {
            if let Some(locator) = self.locator.as_mut() {
                if let Some(found) = locator.locate().await {
                    return (found.latitude, found.longitude);
                }
            }
        }
        (latitude, longitude)
    }

    /// Tick every [`interval`](Self::interval) until Ctrl-C.
    ///
    /// Display failures are logged and retried on the next tick.
    pub async fn run(&mut self) {
        loop {
            if let Err(e) = self.tick().await {
                warn!(error = %e, "cannot apply display settings");
            }
            tokio::select! {
                _ = tokio::time::sleep(self.interval()) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, stopping controller");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
