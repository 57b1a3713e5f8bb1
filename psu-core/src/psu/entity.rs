//! Hot-swappable PSU backed by the hw-management sysfs tree

use std::path::Path;

use crate::constants::vpd;
use crate::fan::PsuFan;
use crate::scale::{scale_raw, Quantity};
use crate::sysfs::read_flag;
use crate::vpd::VpdParser;
use crate::workaround::WorkaroundEnv;

use super::{PsuContext, PsuDevice, PsuPaths};

pub struct PowerSupply {
    index: usize,
    paths: PsuPaths,
    position_in_parent: usize,
    replaceable: bool,
    vpd: VpdParser,
    fans: Vec<PsuFan>,
    ctx: PsuContext,
}

impl std::fmt::Debug for PowerSupply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerSupply")
            .field("index", &self.index)
            .field("paths", &self.paths)
            .field("fans", &self.fans)
            .finish()
    }
}

impl PowerSupply {
    pub fn new(index: usize, paths: PsuPaths, ctx: PsuContext) -> Self {
        let vpd = VpdParser::with_delimiter(&paths.vpd, ctx.vpd_delimiter);
        let fans = paths
            .fan_speeds
            .iter()
            .enumerate()
            .map(|(fan_index, speed)| {
                PsuFan::new(
                    index,
                    fan_index,
                    paths.presence.clone(),
                    speed.clone(),
                    ctx.sysfs.clone(),
                )
            })
            .collect();

        Self {
            index,
            position_in_parent: index + 1,
            replaceable: true,
            paths,
            vpd,
            fans,
            ctx,
        }
    }

    pub fn paths(&self) -> &PsuPaths {
        &self.paths
    }

    pub fn vpd(&self) -> &VpdParser {
        &self.vpd
    }

    pub fn vpd_mut(&mut self) -> &mut VpdParser {
        &mut self.vpd
    }

    pub fn fans(&self) -> &[PsuFan] {
        &self.fans
    }

    /// Read and scale `path`, only while the PSU is delivering power
    fn read_gated(&self, path: &Path, quantity: Quantity) -> Option<f64> {
        if !self.get_powergood_status() {
            return None;
        }
        scale_raw(self.ctx.sysfs.read_int(path), quantity)
    }

    /// Whether the capability file lists `token`
    ///
    /// No capability file, or one that cannot be read, restricts nothing.
    fn threshold_supported(&self, token: &str) -> bool {
        let Some(path) = &self.paths.voltage_capability else {
            return true;
        };
        match self.ctx.sysfs.read_str(path) {
            Some(capability) => capability.split_whitespace().any(|t| t == token),
            None => true,
        }
    }

    /// VPD field, `"N/A"` when missing or blank
    fn vpd_field(&self, key: &str) -> String {
        match self.vpd.get_entry_value(key) {
            Ok(value) if !value.is_empty() => value,
            _ => vpd::NOT_AVAILABLE.to_string(),
        }
    }

    fn workaround_env(&self) -> WorkaroundEnv<'_> {
        WorkaroundEnv {
            vpd: &self.vpd,
            platform: self.ctx.platform.as_ref(),
            runner: self.ctx.runner.as_ref(),
            sysfs: self.ctx.sysfs.as_ref(),
        }
    }
}

impl PsuDevice for PowerSupply {
    fn index(&self) -> usize {
        self.index
    }

    fn get_presence(&self) -> bool {
        read_flag(self.ctx.sysfs.as_ref(), &self.paths.presence)
    }

    fn get_powergood_status(&self) -> bool {
        read_flag(self.ctx.sysfs.as_ref(), &self.paths.oper_status)
    }

    fn get_voltage(&self) -> Option<f64> {
        self.read_gated(&self.paths.voltage, Quantity::Voltage)
    }

    fn get_current(&self) -> Option<f64> {
        self.read_gated(&self.paths.current, Quantity::Current)
    }

    fn get_power(&self) -> Option<f64> {
        self.read_gated(&self.paths.power, Quantity::Power)
    }

    fn get_temperature(&self) -> Option<f64> {
        self.read_gated(&self.paths.temperature, Quantity::Temperature)
    }

    fn get_voltage_high_threshold(&self) -> Option<f64> {
        if !self.get_powergood_status() || !self.threshold_supported("max") {
            return None;
        }
        let path = &self.paths.voltage_max;
        let raw = self.ctx.sysfs.read_int(path)?;
        let raw = self.ctx.policy.apply(raw, path, &self.workaround_env())?;
        Some(Quantity::Voltage.scale(raw))
    }

    fn get_voltage_low_threshold(&self) -> Option<f64> {
        if !self.threshold_supported("min") {
            return None;
        }
        self.read_gated(&self.paths.voltage_min, Quantity::Voltage)
    }

    fn get_temperature_high_threshold(&self) -> Option<f64> {
        self.read_gated(&self.paths.temperature_threshold, Quantity::Temperature)
    }

    fn get_maximum_supplied_power(&self) -> Option<f64> {
        let path = self.paths.power_max.as_ref()?;
        self.read_gated(path, Quantity::Power)
    }

    fn get_model(&self) -> String {
        self.vpd_field(vpd::MODEL_FIELD)
    }

    fn get_serial(&self) -> String {
        self.vpd_field(vpd::SERIAL_FIELD)
    }

    fn get_revision(&self) -> String {
        self.vpd_field(vpd::REVISION_FIELD)
    }

    fn num_fans(&self) -> usize {
        self.fans.len()
    }

    fn get_fan(&self, index: usize) -> &PsuFan {
        match self.fans.get(index) {
            Some(fan) => fan,
            None => panic!(
                "PSU {} has {} fan(s), index {} out of range",
                self.index + 1,
                self.fans.len(),
                index
            ),
        }
    }

    fn get_position_in_parent(&self) -> usize {
        self.position_in_parent
    }

    fn is_replaceable(&self) -> bool {
        self.replaceable
    }
}
