/*
 * This file is part of psumon.
 *
 * Copyright (C) 2025 psumon contributors
 *
 * psumon is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * psumon is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with psumon. If not, see <https://www.gnu.org/licenses/>.
 */

//! Subcommand dispatch

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{bail, Context};
use tracing::debug;

use psu_core::{
    build_psus, capture_snapshot, get_settings_path, load_settings, snapshot_to_json,
    snapshot_to_json_compact, PsuContext, PsuLayout, PsuSettings, VpdParser,
};

use crate::cli::{Cli, Commands};
use crate::report;

/// Settings file plus command line overrides
pub fn resolve_settings(cli: &Cli) -> anyhow::Result<PsuSettings> {
    let path = cli.config.clone().unwrap_or_else(get_settings_path);
    let mut settings = load_settings(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;

    if let Some(platform) = &cli.platform {
        settings.platform = Some(platform.clone());
    }
    if let Some(root) = &cli.root {
        settings.hw_mgmt_root = root.clone();
    }
    Ok(settings)
}

fn check_index(settings: &PsuSettings, index: usize) -> anyhow::Result<()> {
    if index >= settings.psu_count {
        bail!(
            "PSU index {} out of range (platform has {} PSUs)",
            index,
            settings.psu_count
        );
    }
    Ok(())
}

/// Run one subcommand, writing its output to `out`
pub fn run(
    command: &Commands,
    settings: &PsuSettings,
    ctx: &PsuContext,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    debug!(?command, root = %settings.hw_mgmt_root.display(), "Running command");

    match command {
        Commands::Status { index } => {
            if let Some(i) = index {
                check_index(settings, *i)?;
            }
            let psus = build_psus(settings, ctx);
            let snapshot = capture_snapshot(&psus, ctx.platform.as_ref());
            write!(out, "{}", report::render_status(&snapshot, *index))?;
        }
        Commands::Json { compact } => {
            let psus = build_psus(settings, ctx);
            let snapshot = capture_snapshot(&psus, ctx.platform.as_ref());
            let json = if *compact {
                snapshot_to_json_compact(&snapshot)?
            } else {
                snapshot_to_json(&snapshot)?
            };
            writeln!(out, "{}", json)?;
        }
        Commands::Vpd { index } => {
            check_index(settings, *index)?;
            if settings.fixed_psu {
                bail!("Fixed PSUs expose no VPD");
            }
            let layout = PsuLayout::new(&settings.hw_mgmt_root);
            let parser = VpdParser::with_delimiter(layout.paths(*index).vpd, ctx.vpd_delimiter);
            let entries: BTreeMap<String, String> = parser.entries().into_iter().collect();
            if entries.is_empty() {
                bail!("No VPD available at {}", parser.path().display());
            }
            write!(out, "{}", report::render_vpd(&entries))?;
        }
    }
    Ok(())
}

/// Parse-independent entry point used by the binary
pub fn run_cli(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let settings = resolve_settings(cli)?;
    let ctx = settings.context();
    run(&cli.command_or_default(), &settings, &ctx, out)
}
