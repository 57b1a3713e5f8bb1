//! Fans built into a PSU
//!
//! Only the accessor surface is modelled: name, presence and measured speed.
//! PSU fans are driven by the PSU's own firmware and are not controllable.

use std::path::PathBuf;
use std::sync::Arc;

use crate::sysfs::{read_flag, SysfsAccess};

#[derive(Clone)]
pub struct PsuFan {
    psu_index: usize,
    fan_index: usize,
    presence_path: PathBuf,
    speed_path: PathBuf,
    sysfs: Arc<dyn SysfsAccess>,
}

impl std::fmt::Debug for PsuFan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PsuFan")
            .field("name", &self.name())
            .field("speed_path", &self.speed_path)
            .finish()
    }
}

impl PsuFan {
    pub fn new(
        psu_index: usize,
        fan_index: usize,
        presence_path: PathBuf,
        speed_path: PathBuf,
        sysfs: Arc<dyn SysfsAccess>,
    ) -> Self {
        Self {
            psu_index,
            fan_index,
            presence_path,
            speed_path,
            sysfs,
        }
    }

    /// `psu{n}_fan{m}`, both 1-based
    pub fn name(&self) -> String {
        format!("psu{}_fan{}", self.psu_index + 1, self.fan_index + 1)
    }

    pub fn fan_index(&self) -> usize {
        self.fan_index
    }

    /// A PSU fan is present exactly when its PSU is
    pub fn get_presence(&self) -> bool {
        read_flag(self.sysfs.as_ref(), &self.presence_path)
    }

    pub fn get_speed_rpm(&self) -> Option<u32> {
        self.sysfs
            .read_int(&self.speed_path)
            .and_then(|rpm| u32::try_from(rpm).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysfs::SysfsReader;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_psu_fan() {
        let dir = TempDir::new().unwrap();
        let presence = dir.path().join("psu2_status");
        let speed = dir.path().join("psu2_fan1_speed_get");
        let fan = PsuFan::new(1, 0, presence.clone(), speed.clone(), Arc::new(SysfsReader));

        assert_eq!(fan.name(), "psu2_fan1");
        assert_eq!(fan.fan_index(), 0);
        assert!(!fan.get_presence());
        assert_eq!(fan.get_speed_rpm(), None);

        fs::write(&presence, "1").unwrap();
        fs::write(&speed, "8200").unwrap();
        assert!(fan.get_presence());
        assert_eq!(fan.get_speed_rpm(), Some(8200));

        fs::write(&speed, "-1").unwrap();
        assert_eq!(fan.get_speed_rpm(), None);
    }
}
