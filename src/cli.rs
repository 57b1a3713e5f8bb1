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

//! Command Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "psumon")]
#[command(version)]
#[command(about = "psumon - PSU monitor for network switches")]
#[command(long_about = "psumon - PSU monitor for network switches

Reads PSU telemetry from the hw-management sysfs tree, decodes the PSU
VPD and applies known firmware workarounds.

EXAMPLES:
    psumon                         Show all PSUs (same as 'status')
    psumon status --index 0        Show the first PSU only
    psumon json                    Dump a full snapshot as JSON
    psumon vpd 1                   Print every VPD field of the second PSU

ENVIRONMENT VARIABLES:
    PSUMON_LOG=debug      Log level / filter (default: info)
    PLATFORM=<name>       Override the platform name from machine.conf

FILES:
    /etc/psumon/settings.json      System settings
    ~/.config/psumon/settings.json Per-user settings")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (default: /etc/psumon/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Platform name, overrides PLATFORM and machine.conf
    #[arg(long, global = true)]
    pub platform: Option<String>,

    /// hw-management root, overrides the settings file
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show PSU readings as text (default)
    Status {
        /// Zero-based PSU index
        #[arg(long)]
        index: Option<usize>,
    },

    /// Dump a snapshot of all PSUs as JSON
    Json {
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },

    /// Print every VPD field of a PSU
    Vpd {
        /// Zero-based PSU index
        index: usize,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Status { index: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["psumon"]);
        assert_eq!(cli.command_or_default(), Commands::Status { index: None });
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "psumon",
            "json",
            "--compact",
            "--platform",
            "x86_64-mlnx_msn3700-r0",
            "--root",
            "/tmp/hw",
        ]);
        assert_eq!(cli.command_or_default(), Commands::Json { compact: true });
        assert_eq!(cli.platform.as_deref(), Some("x86_64-mlnx_msn3700-r0"));
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/hw")));
    }

    #[test]
    fn test_vpd_requires_index() {
        assert!(Cli::try_parse_from(["psumon", "vpd"]).is_err());
        let cli = Cli::parse_from(["psumon", "vpd", "1"]);
        assert_eq!(cli.command_or_default(), Commands::Vpd { index: 1 });
    }
}
