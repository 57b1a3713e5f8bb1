//! PSU data capture
//!
//! Reads every getter of every PSU into serializable snapshots, for the CLI,
//! diagnostics and bug reports.

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::data::{FanSnapshot, PsuSnapshot, SystemSnapshot};
use crate::error::Result;
use crate::platform::PlatformIdentity;
use crate::psu::PsuDevice;

/// Capture one PSU
pub fn capture_psu(psu: &dyn PsuDevice) -> PsuSnapshot {
    let fans = (0..psu.num_fans())
        .map(|i| {
            let fan = psu.get_fan(i);
            FanSnapshot {
                name: fan.name(),
                presence: fan.get_presence(),
                speed_rpm: fan.get_speed_rpm(),
            }
        })
        .collect();

    PsuSnapshot {
        name: psu.get_name(),
        index: psu.index(),
        position_in_parent: psu.get_position_in_parent(),
        replaceable: psu.is_replaceable(),
        presence: psu.get_presence(),
        powergood: psu.get_powergood_status(),
        model: psu.get_model(),
        serial: psu.get_serial(),
        revision: psu.get_revision(),
        voltage: psu.get_voltage(),
        voltage_high_threshold: psu.get_voltage_high_threshold(),
        voltage_low_threshold: psu.get_voltage_low_threshold(),
        current: psu.get_current(),
        power: psu.get_power(),
        max_supplied_power: psu.get_maximum_supplied_power(),
        temperature: psu.get_temperature(),
        temperature_high_threshold: psu.get_temperature_high_threshold(),
        fans,
    }
}

/// Capture every PSU together with the platform name
pub fn capture_snapshot(psus: &[Box<dyn PsuDevice>], platform: &dyn PlatformIdentity) -> SystemSnapshot {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let psus: Vec<PsuSnapshot> = psus.iter().map(|p| capture_psu(p.as_ref())).collect();

    debug!(psus = psus.len(), timestamp = timestamp_ms, "Captured PSU snapshot");

    SystemSnapshot {
        timestamp_ms,
        platform: platform.platform_name(),
        psus,
    }
}

/// Export snapshot as JSON string
pub fn snapshot_to_json(snapshot: &SystemSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Export snapshot as compact JSON string
pub fn snapshot_to_json_compact(snapshot: &SystemSnapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}
