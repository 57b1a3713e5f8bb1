//! Unit conversion for raw PSU readings
//!
//! The PSU driver reports every quantity as an integer in a minor unit.
//! Conversion is a single division by a fixed divisor per quantity.

use crate::constants::scale;

/// A physical quantity reported by the PSU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// millivolts
    Voltage,
    /// milliamps
    Current,
    /// microwatts
    Power,
    /// millidegrees Celsius
    Temperature,
}

impl Quantity {
    pub fn divisor(self) -> f64 {
        match self {
            Quantity::Voltage => scale::VOLTAGE_DIVISOR,
            Quantity::Current => scale::CURRENT_DIVISOR,
            Quantity::Power => scale::POWER_DIVISOR,
            Quantity::Temperature => scale::TEMPERATURE_DIVISOR,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Quantity::Voltage => "V",
            Quantity::Current => "A",
            Quantity::Power => "W",
            Quantity::Temperature => "°C",
        }
    }

    /// Convert a raw reading into this quantity's physical unit
    pub fn scale(self, raw: i64) -> f64 {
        raw as f64 / self.divisor()
    }
}

/// Scale an optional raw reading, keeping absence intact
pub fn scale_raw(raw: Option<i64>, quantity: Quantity) -> Option<f64> {
    raw.map(|v| quantity.scale(v))
}
