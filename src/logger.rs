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

use std::path::Path;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PSUMON_LOG";
const DEFAULT_LEVEL: &str = "info";
const JOURNALD_SOCKET: &str = "/run/systemd/journal/socket";

/// Where log output ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Journald,
    Stderr,
}

/// Log filter from PSUMON_LOG, defaulting to `info`
pub fn log_filter() -> String {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Install the global subscriber
///
/// Logs go to the systemd journal when its socket exists, otherwise to
/// stderr so stdout stays clean for JSON output.
pub fn init_logging() -> LogTarget {
    let level = log_filter();

    if Path::new(JOURNALD_SOCKET).exists() {
        match tracing_journald::layer() {
            Ok(journald_layer) => {
                use tracing_subscriber::prelude::*;
                tracing_subscriber::registry()
                    .with(journald_layer)
                    .with(EnvFilter::new(&level))
                    .init();
                return LogTarget::Journald;
            }
            Err(e) => {
                eprintln!("Failed to create journald layer: {}, falling back to stderr", e);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(&level))
        .init();
    LogTarget::Stderr
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_log_filter_default_and_override() {
        std::env::remove_var(LOG_ENV);
        assert_eq!(log_filter(), "info");

        std::env::set_var(LOG_ENV, "psu_core=debug");
        assert_eq!(log_filter(), "psu_core=debug");

        std::env::set_var(LOG_ENV, "  ");
        assert_eq!(log_filter(), "info");
        std::env::remove_var(LOG_ENV);
    }
}
