//! Soldered-in PSU for platforms without PSU sensors

use std::path::PathBuf;
use std::sync::Arc;

use crate::constants::vpd;
use crate::fan::PsuFan;
use crate::sysfs::{read_flag, SysfsAccess};

use super::PsuDevice;

/// PSU that only exposes presence and power-good
///
/// Electrical and thermal readings are never available and identity fields
/// are always `"N/A"`.
pub struct FixedPowerSupply {
    index: usize,
    oper_status: PathBuf,
    presence_probe: Option<PathBuf>,
    sysfs: Arc<dyn SysfsAccess>,
}

impl std::fmt::Debug for FixedPowerSupply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedPowerSupply")
            .field("index", &self.index)
            .field("oper_status", &self.oper_status)
            .field("presence_probe", &self.presence_probe)
            .finish()
    }
}

impl FixedPowerSupply {
    /// `presence_probe` of `None` means the unit is built in and always present
    pub fn new(
        index: usize,
        oper_status: PathBuf,
        presence_probe: Option<PathBuf>,
        sysfs: Arc<dyn SysfsAccess>,
    ) -> Self {
        Self {
            index,
            oper_status,
            presence_probe,
            sysfs,
        }
    }
}

impl PsuDevice for FixedPowerSupply {
    fn index(&self) -> usize {
        self.index
    }

    fn get_presence(&self) -> bool {
        match &self.presence_probe {
            Some(probe) => read_flag(self.sysfs.as_ref(), probe),
            None => true,
        }
    }

    fn get_powergood_status(&self) -> bool {
        read_flag(self.sysfs.as_ref(), &self.oper_status)
    }

    fn get_voltage(&self) -> Option<f64> {
        None
    }

    fn get_current(&self) -> Option<f64> {
        None
    }

    fn get_power(&self) -> Option<f64> {
        None
    }

    fn get_temperature(&self) -> Option<f64> {
        None
    }

    fn get_voltage_high_threshold(&self) -> Option<f64> {
        None
    }

    fn get_voltage_low_threshold(&self) -> Option<f64> {
        None
    }

    fn get_temperature_high_threshold(&self) -> Option<f64> {
        None
    }

    fn get_maximum_supplied_power(&self) -> Option<f64> {
        None
    }

    fn get_model(&self) -> String {
        vpd::NOT_AVAILABLE.to_string()
    }

    fn get_serial(&self) -> String {
        vpd::NOT_AVAILABLE.to_string()
    }

    fn get_revision(&self) -> String {
        vpd::NOT_AVAILABLE.to_string()
    }

    fn num_fans(&self) -> usize {
        0
    }

    fn get_fan(&self, index: usize) -> &PsuFan {
        panic!("PSU {} is fixed and has no fans, index {} out of range", self.index + 1, index)
    }

    fn get_position_in_parent(&self) -> usize {
        self.index + 1
    }

    fn is_replaceable(&self) -> bool {
        false
    }
}
