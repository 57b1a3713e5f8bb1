//! Invalid PSU voltage threshold workaround
//!
//! Some DELTA 1100 W units on Spectrum-2/3 switches report a bogus voltage
//! threshold (raw `127998`) until the sensor bus is re-scanned. The policy
//! detects that sentinel and, only for the allow-listed platform, vendor and
//! capacity, triggers `sensors -s` and re-reads the threshold.
//!
//! The decision ([`InvalidVoltagePolicy::should_correct`]) performs no I/O of
//! its own: lookups are passed in as closures and evaluated lazily, cheapest
//! first, so the VPD is only parsed once the value and platform match.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::command::CommandRunner;
use crate::constants::{vpd, workaround};
use crate::platform::PlatformIdentity;
use crate::sysfs::SysfsAccess;
use crate::vpd::VpdParser;

/// Collaborators the workaround needs to apply a correction
pub struct WorkaroundEnv<'a> {
    pub vpd: &'a VpdParser,
    pub platform: &'a dyn PlatformIdentity,
    pub runner: &'a dyn CommandRunner,
    pub sysfs: &'a dyn SysfsAccess,
}

/// Allow-list driven policy for the invalid voltage threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvalidVoltagePolicy {
    /// Disable to always report the raw firmware value
    pub enabled: bool,
    /// Raw threshold value the firmware reports when broken
    pub sentinel: i64,
    pub platforms: Vec<String>,
    pub vendor: String,
    pub capacity: String,
    /// Command that re-scans the sensor bus
    pub command: String,
    pub settle_delay_ms: u64,
}

impl Default for InvalidVoltagePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            sentinel: workaround::INVALID_VOLTAGE_VALUE,
            platforms: workaround::EXPECT_PLATFORMS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            vendor: workaround::EXPECT_VENDOR_NAME.to_string(),
            capacity: workaround::EXPECT_CAPACITY.to_string(),
            command: workaround::RESCAN_COMMAND.to_string(),
            settle_delay_ms: workaround::SETTLE_DELAY_MS,
        }
    }
}

impl InvalidVoltagePolicy {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Decide whether `value` must be corrected
    ///
    /// Checks run in order and stop at the first mismatch: sentinel value,
    /// platform allow-list, vendor, capacity. A lookup returning `None`
    /// counts as a mismatch.
    pub fn should_correct<P, V, C>(&self, value: i64, platform: P, vendor: V, capacity: C) -> bool
    where
        P: FnOnce() -> Option<String>,
        V: FnOnce() -> Option<String>,
        C: FnOnce() -> Option<String>,
    {
        if !self.enabled || value != self.sentinel {
            return false;
        }

        let Some(platform) = platform() else {
            debug!("Invalid voltage threshold seen but platform is unknown");
            return false;
        };
        if !self.platforms.iter().any(|p| *p == platform) {
            debug!(platform = %platform, "Platform not affected by invalid voltage threshold");
            return false;
        }

        if vendor().as_deref() != Some(self.vendor.as_str()) {
            return false;
        }

        capacity().as_deref() == Some(self.capacity.as_str())
    }

    /// Return the corrected raw threshold, or `value` when no correction applies
    ///
    /// On correction the re-scan command runs, the policy waits for the bus to
    /// settle and the raw file is re-read as-is. Power-good is not checked
    /// again and command failures are only logged: whatever the file holds
    /// afterwards is the answer.
    pub fn apply(&self, value: i64, threshold_path: &Path, env: &WorkaroundEnv<'_>) -> Option<i64> {
        let correct = self.should_correct(
            value,
            || env.platform.platform_name(),
            || env.vpd.get_entry_value(vpd::MANUFACTURER_FIELD).ok(),
            || env.vpd.get_entry_value(vpd::CAPACITY_FIELD).ok(),
        );
        if !correct {
            return Some(value);
        }

        info!(
            path = %threshold_path.display(),
            value,
            command = %self.command,
            "Invalid PSU voltage threshold detected, re-scanning sensors"
        );
        if let Err(e) = env.runner.run(&self.command) {
            warn!("Sensor re-scan failed: {}", e);
        }
        if self.settle_delay_ms > 0 {
            thread::sleep(self.settle_delay());
        }

        let corrected = env.sysfs.read_int(threshold_path);
        info!(path = %threshold_path.display(), corrected = ?corrected, "Re-read PSU voltage threshold");
        corrected
    }
}
