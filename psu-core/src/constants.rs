//! Constants and configuration defaults for psumon
//!
//! Paths, scale divisors, VPD field names and workaround defaults live here
//! so the rest of the crate never carries magic numbers.

use std::time::Duration;

/// System paths
pub mod paths {
    /// Root of the hw-management sysfs mirror exported by the platform driver
    pub const HW_MGMT_ROOT: &str = "/var/run/hw-management";

    /// Machine configuration written by the installer (ONIE / Aboot)
    pub const MACHINE_CONF: &str = "/host/machine.conf";

    /// Configuration directory
    pub const CONFIG_DIR: &str = "/etc/psumon";

    /// Settings file name inside the configuration directory
    pub const SETTINGS_FILE: &str = "settings.json";

    /// Per-user configuration directory, used when not running as a service
    pub fn user_config_dir() -> Option<std::path::PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(std::path::PathBuf::from(xdg).join("psumon"));
        }
        dirs::config_dir().map(|p| p.join("psumon"))
    }

    /// Sub-directories of the hw-management root
    pub mod hw_mgmt {
        pub const THERMAL: &str = "thermal";
        pub const POWER: &str = "power";
        pub const EEPROM: &str = "eeprom";
        pub const FAN: &str = "fan";
    }
}

/// Unit scaling for raw sysfs readings
pub mod scale {
    /// millivolts -> volts
    pub const VOLTAGE_DIVISOR: f64 = 1000.0;
    /// milliamps -> amps
    pub const CURRENT_DIVISOR: f64 = 1000.0;
    /// microwatts -> watts
    pub const POWER_DIVISOR: f64 = 1_000_000.0;
    /// millidegrees -> degrees Celsius
    pub const TEMPERATURE_DIVISOR: f64 = 1000.0;
}

/// Sysfs status encodings
pub mod status {
    /// Value a presence or power-good file holds when asserted
    pub const ASSERTED: i64 = 1;
}

/// Vital product data
pub mod vpd {
    /// Sentinel returned for identity fields that cannot be read
    pub const NOT_AVAILABLE: &str = "N/A";

    /// Default key/value delimiter in VPD files
    pub const DEFAULT_DELIMITER: char = '=';

    pub const MODEL_FIELD: &str = "PN_VPD_FIELD";
    pub const SERIAL_FIELD: &str = "SN_VPD_FIELD";
    pub const REVISION_FIELD: &str = "REV_VPD_FIELD";
    pub const MANUFACTURER_FIELD: &str = "MFR_NAME";
    pub const CAPACITY_FIELD: &str = "CAPACITY";
}

/// Invalid voltage threshold workaround defaults
pub mod workaround {
    /// Raw voltage threshold some PSU firmware reports instead of the real limit
    pub const INVALID_VOLTAGE_VALUE: i64 = 127998;

    pub const EXPECT_VENDOR_NAME: &str = "DELTA";

    pub const EXPECT_CAPACITY: &str = "1100";

    pub const EXPECT_PLATFORMS: &[&str] = &[
        "x86_64-mlnx_msn3700-r0",
        "x86_64-mlnx_msn3700c-r0",
        "x86_64-mlnx_msn3800-r0",
        "x86_64-mlnx_msn4600c-r0",
    ];

    /// Re-scan trigger for the lm-sensors subsystem
    pub const RESCAN_COMMAND: &str = "sensors -s";

    /// Time the sensor bus needs after a re-scan before values settle
    pub const SETTLE_DELAY_MS: u64 = 1000;
}

/// External command execution
pub mod command {
    use super::Duration;

    /// Upper bound on a single external command
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// How often a running command is polled for completion
    pub const POLL_INTERVAL: Duration = Duration::from_millis(20);
}

/// Platform identity
pub mod platform {
    /// Environment variable that overrides the machine.conf lookup
    pub const ENV_VAR: &str = "PLATFORM";

    /// machine.conf keys carrying the platform name, in lookup order
    pub const MACHINE_CONF_KEYS: &[&str] = &["onie_platform", "aboot_platform"];
}

/// PSU topology defaults
pub mod psu {
    /// Fans per PSU on every supported platform
    pub const FANS_PER_PSU: usize = 1;

    /// PSU slots on a typical 1U switch
    pub const DEFAULT_PSU_COUNT: usize = 2;
}
