//! Power supply unit models
//!
//! Two variants share the [`PsuDevice`] contract:
//!
//! - [`PowerSupply`]: hot-swappable PSU with a sensor bus and VPD EEPROM
//! - [`FixedPowerSupply`]: soldered-in PSU on platforms without PSU sensors
//!
//! Numeric getters return `None` when the reading is unavailable (file
//! missing, unit not delivering power). Identity getters return `"N/A"`.

mod entity;
mod fixed;
mod layout;

pub use entity::PowerSupply;
pub use fixed::FixedPowerSupply;
pub use layout::{build_psus, PsuLayout};

use std::path::PathBuf;
use std::sync::Arc;

use crate::command::{CommandRunner, ShellCommandRunner};
use crate::constants::vpd;
use crate::fan::PsuFan;
use crate::platform::{MachineConfPlatform, PlatformIdentity};
use crate::sysfs::{SysfsAccess, SysfsReader};
use crate::workaround::InvalidVoltagePolicy;

/// Capability contract common to every PSU variant
pub trait PsuDevice: Send + Sync {
    /// Zero-based slot index
    fn index(&self) -> usize;

    /// `PSU {n}`, 1-based
    fn get_name(&self) -> String {
        format!("PSU {}", self.index() + 1)
    }

    fn get_presence(&self) -> bool;

    fn get_powergood_status(&self) -> bool;

    /// Present and delivering power
    fn get_status(&self) -> bool {
        self.get_presence() && self.get_powergood_status()
    }

    /// Output voltage in volts
    fn get_voltage(&self) -> Option<f64>;

    /// Output current in amps
    fn get_current(&self) -> Option<f64>;

    /// Output power in watts
    fn get_power(&self) -> Option<f64>;

    /// Temperature in degrees Celsius
    fn get_temperature(&self) -> Option<f64>;

    fn get_voltage_high_threshold(&self) -> Option<f64>;

    fn get_voltage_low_threshold(&self) -> Option<f64>;

    fn get_temperature_high_threshold(&self) -> Option<f64>;

    /// Rated output power in watts
    fn get_maximum_supplied_power(&self) -> Option<f64>;

    fn get_model(&self) -> String;

    fn get_serial(&self) -> String;

    fn get_revision(&self) -> String;

    fn num_fans(&self) -> usize;

    /// Fan at `index`
    ///
    /// # Panics
    ///
    /// Panics when `index >= num_fans()`.
    fn get_fan(&self, index: usize) -> &PsuFan;

    fn get_position_in_parent(&self) -> usize;

    fn is_replaceable(&self) -> bool;
}

/// Backing files of one PSU, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsuPaths {
    pub presence: PathBuf,
    pub oper_status: PathBuf,
    pub voltage: PathBuf,
    pub voltage_min: PathBuf,
    pub voltage_max: PathBuf,
    /// Lists the supported voltage thresholds (`min`, `max`)
    pub voltage_capability: Option<PathBuf>,
    pub current: PathBuf,
    pub power: PathBuf,
    pub power_max: Option<PathBuf>,
    pub temperature: PathBuf,
    pub temperature_threshold: PathBuf,
    pub vpd: PathBuf,
    /// One speed file per fan, in fan order
    pub fan_speeds: Vec<PathBuf>,
}

/// Shared collaborators handed to every PSU
#[derive(Clone)]
pub struct PsuContext {
    pub sysfs: Arc<dyn SysfsAccess>,
    pub platform: Arc<dyn PlatformIdentity>,
    pub runner: Arc<dyn CommandRunner>,
    pub policy: Arc<InvalidVoltagePolicy>,
    pub vpd_delimiter: char,
}

impl PsuContext {
    pub fn new(
        sysfs: Arc<dyn SysfsAccess>,
        platform: Arc<dyn PlatformIdentity>,
        runner: Arc<dyn CommandRunner>,
        policy: InvalidVoltagePolicy,
    ) -> Self {
        Self {
            sysfs,
            platform,
            runner,
            policy: Arc::new(policy),
            vpd_delimiter: vpd::DEFAULT_DELIMITER,
        }
    }

    pub fn with_vpd_delimiter(mut self, delimiter: char) -> Self {
        self.vpd_delimiter = delimiter;
        self
    }
}

impl Default for PsuContext {
    /// Real filesystem, machine.conf platform lookup, default workaround
    fn default() -> Self {
        Self::new(
            Arc::new(SysfsReader),
            Arc::new(MachineConfPlatform::default()),
            Arc::new(ShellCommandRunner::default()),
            InvalidVoltagePolicy::default(),
        )
    }
}
