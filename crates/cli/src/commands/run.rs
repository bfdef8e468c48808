// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bluedim run` - foreground display controller

use anyhow::Result;
use bluedim_core::{default_schema, SystemClock};
use bluedim_daemon::env;
use clap::Args;

use crate::controller::{Controller, DisplayBackend, DryRunDisplay, Tick, XrandrDisplay};
use crate::exit_error::{ExitError, EXIT_FAILURE};
use crate::locate::Locator;

#[derive(Args)]
pub struct RunArgs {
    /// Apply once and exit
    #[arg(long)]
    pub once: bool,

    /// Log what would be applied instead of touching the display
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: RunArgs) -> Result<()> {
    if args.dry_run {
        drive(DryRunDisplay::default(), args.once).await
    } else {
        drive(XrandrDisplay::new(), args.once).await
    }
}

async fn drive<D: DisplayBackend>(display: D, once: bool) -> Result<()> {
    let client = super::client()?;
    let locator = Locator::new(env::location_url(), env::ipc_timeout())
        .map_err(|e| ExitError::new(EXIT_FAILURE, e.to_string()))?;
    let mut controller =
        Controller::new(client, SystemClock, display, default_schema().defaults())
            .with_locator(locator);

    if !once {
        controller.run().await;
        return Ok(());
    }

    match controller.tick().await {
        Ok(Tick::Applied { elevation, shift, appearance }) => {
            println!(
                "sun {:.1}°, shift {:.2}: {:.0}K, brightness {:.2}",
                elevation, shift, appearance.temperature, appearance.brightness
            );
            Ok(())
        }
        Ok(Tick::Disabled) => {
            println!("controller disabled");
            Ok(())
        }
        Err(e) => Err(ExitError::new(EXIT_FAILURE, e.to_string()).into()),
    }
}
