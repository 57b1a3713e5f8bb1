//! Snapshot data types for psumon

use serde::{Deserialize, Serialize};

/// Every reading of one PSU at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsuSnapshot {
    pub name: String,
    pub index: usize,
    pub position_in_parent: usize,
    pub replaceable: bool,
    pub presence: bool,
    pub powergood: bool,
    pub model: String,
    pub serial: String,
    pub revision: String,
    /// Volts
    pub voltage: Option<f64>,
    pub voltage_high_threshold: Option<f64>,
    pub voltage_low_threshold: Option<f64>,
    /// Amps
    pub current: Option<f64>,
    /// Watts
    pub power: Option<f64>,
    pub max_supplied_power: Option<f64>,
    /// Degrees Celsius
    pub temperature: Option<f64>,
    pub temperature_high_threshold: Option<f64>,
    pub fans: Vec<FanSnapshot>,
}

/// PSU fan reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanSnapshot {
    pub name: String,
    pub presence: bool,
    pub speed_rpm: Option<u32>,
}

/// All PSUs of the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub timestamp_ms: u64,
    pub platform: Option<String>,
    pub psus: Vec<PsuSnapshot>,
}
