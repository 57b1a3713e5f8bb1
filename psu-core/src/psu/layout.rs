//! hw-management file layout for PSU attributes
//!
//! File names are 1-based (`psu1_*` is PSU index 0).

use std::path::PathBuf;

use crate::constants::paths::hw_mgmt;
use crate::settings::PsuSettings;

use super::{FixedPowerSupply, PowerSupply, PsuContext, PsuDevice, PsuPaths};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsuLayout {
    root: PathBuf,
    fans_per_psu: usize,
}

impl PsuLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fans_per_psu: crate::constants::psu::FANS_PER_PSU,
        }
    }

    pub fn with_fans_per_psu(mut self, fans: usize) -> Self {
        self.fans_per_psu = fans;
        self
    }

    fn file(&self, dir: &str, index: usize, attr: &str) -> PathBuf {
        self.root.join(dir).join(format!("psu{}_{}", index + 1, attr))
    }

    /// Backing files of the PSU at zero-based `index`
    pub fn paths(&self, index: usize) -> PsuPaths {
        PsuPaths {
            presence: self.file(hw_mgmt::THERMAL, index, "status"),
            oper_status: self.oper_status(index),
            voltage: self.file(hw_mgmt::POWER, index, "volt"),
            voltage_min: self.file(hw_mgmt::POWER, index, "volt_min"),
            voltage_max: self.file(hw_mgmt::POWER, index, "volt_max"),
            voltage_capability: Some(self.file(hw_mgmt::POWER, index, "volt_capability")),
            current: self.file(hw_mgmt::POWER, index, "curr"),
            power: self.file(hw_mgmt::POWER, index, "power"),
            power_max: Some(self.file(hw_mgmt::POWER, index, "power_capability")),
            temperature: self.file(hw_mgmt::THERMAL, index, "temp"),
            temperature_threshold: self.file(hw_mgmt::THERMAL, index, "temp_max"),
            vpd: self.file(hw_mgmt::EEPROM, index, "vpd"),
            fan_speeds: (0..self.fans_per_psu)
                .map(|fan| self.file(hw_mgmt::FAN, index, &format!("fan{}_speed_get", fan + 1)))
                .collect(),
        }
    }

    /// Power-good file, shared by full and fixed PSUs
    pub fn oper_status(&self, index: usize) -> PathBuf {
        self.file(hw_mgmt::THERMAL, index, "pwr_status")
    }
}

/// Create every PSU described by `settings`
pub fn build_psus(settings: &PsuSettings, ctx: &PsuContext) -> Vec<Box<dyn PsuDevice>> {
    let layout = PsuLayout::new(&settings.hw_mgmt_root).with_fans_per_psu(settings.fans_per_psu);
    (0..settings.psu_count)
        .map(|index| -> Box<dyn PsuDevice> {
            if settings.fixed_psu {
                Box::new(FixedPowerSupply::new(
                    index,
                    layout.oper_status(index),
                    None,
                    ctx.sysfs.clone(),
                ))
            } else {
                Box::new(PowerSupply::new(index, layout.paths(index), ctx.clone()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = PsuLayout::new("/var/run/hw-management");
        let paths = layout.paths(1);

        assert_eq!(paths.presence, PathBuf::from("/var/run/hw-management/thermal/psu2_status"));
        assert_eq!(paths.oper_status, PathBuf::from("/var/run/hw-management/thermal/psu2_pwr_status"));
        assert_eq!(paths.voltage_max, PathBuf::from("/var/run/hw-management/power/psu2_volt_max"));
        assert_eq!(paths.vpd, PathBuf::from("/var/run/hw-management/eeprom/psu2_vpd"));
        assert_eq!(
            paths.fan_speeds,
            vec![PathBuf::from("/var/run/hw-management/fan/psu2_fan1_speed_get")]
        );
    }

    #[test]
    fn test_layout_fans_per_psu() {
        let layout = PsuLayout::new("/hw").with_fans_per_psu(2);
        assert_eq!(layout.paths(0).fan_speeds.len(), 2);
        assert_eq!(layout.paths(0).fan_speeds[1], PathBuf::from("/hw/fan/psu1_fan2_speed_get"));
    }

    #[test]
    fn test_build_psus() {
        let ctx = PsuContext::default();

        let settings = PsuSettings {
            psu_count: 2,
            ..PsuSettings::default()
        };
        let psus = build_psus(&settings, &ctx);
        assert_eq!(psus.len(), 2);
        assert!(psus.iter().all(|p| p.is_replaceable()));
        assert_eq!(psus[1].get_position_in_parent(), 2);
        assert_eq!(psus[1].num_fans(), 1);

        let settings = PsuSettings {
            psu_count: 1,
            fixed_psu: true,
            ..PsuSettings::default()
        };
        let psus = build_psus(&settings, &ctx);
        assert_eq!(psus.len(), 1);
        assert!(!psus[0].is_replaceable());
        assert!(psus[0].get_presence());
    }
}
