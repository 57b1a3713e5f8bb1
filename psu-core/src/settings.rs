//! Persistent settings
//!
//! Stored as JSON, by default in /etc/psumon/settings.json. Every field has a
//! default so partial files and a missing file are both valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::command::ShellCommandRunner;
use crate::constants::{command, paths, psu, vpd};
use crate::error::{PsuError, Result};
use crate::platform::{MachineConfPlatform, PlatformIdentity, StaticPlatform};
use crate::psu::PsuContext;
use crate::sysfs::SysfsReader;
use crate::workaround::InvalidVoltagePolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsuSettings {
    /// Root of the hw-management sysfs mirror
    pub hw_mgmt_root: PathBuf,
    pub psu_count: usize,
    pub fans_per_psu: usize,
    /// Platform has soldered-in PSUs without a sensor bus
    pub fixed_psu: bool,
    pub vpd_delimiter: char,
    pub machine_conf: PathBuf,
    /// Overrides PLATFORM / machine.conf when set
    pub platform: Option<String>,
    pub command_timeout_ms: u64,
    pub voltage_workaround: InvalidVoltagePolicy,
}

impl Default for PsuSettings {
    fn default() -> Self {
        Self {
            hw_mgmt_root: PathBuf::from(paths::HW_MGMT_ROOT),
            psu_count: psu::DEFAULT_PSU_COUNT,
            fans_per_psu: psu::FANS_PER_PSU,
            fixed_psu: false,
            vpd_delimiter: vpd::DEFAULT_DELIMITER,
            machine_conf: PathBuf::from(paths::MACHINE_CONF),
            platform: None,
            command_timeout_ms: command::DEFAULT_TIMEOUT.as_millis() as u64,
            voltage_workaround: InvalidVoltagePolicy::default(),
        }
    }
}

impl PsuSettings {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.psu_count == 0 {
            return Err(PsuError::invalid_config("psu_count", "must be at least 1"));
        }
        if self.vpd_delimiter.is_whitespace() {
            return Err(PsuError::invalid_config(
                "vpd_delimiter",
                "whitespace cannot delimit VPD fields",
            ));
        }
        if self.command_timeout_ms == 0 {
            return Err(PsuError::invalid_config("command_timeout_ms", "must be non-zero"));
        }
        let policy = &self.voltage_workaround;
        if policy.enabled && policy.command.trim().is_empty() {
            return Err(PsuError::invalid_config(
                "voltage_workaround.command",
                "cannot be empty while the workaround is enabled",
            ));
        }
        Ok(())
    }

    /// Build the collaborators every PSU shares
    pub fn context(&self) -> PsuContext {
        let platform: Arc<dyn PlatformIdentity> = match &self.platform {
            Some(name) => Arc::new(StaticPlatform::new(name.clone())),
            None => Arc::new(MachineConfPlatform::new(&self.machine_conf)),
        };
        PsuContext::new(
            Arc::new(SysfsReader),
            platform,
            Arc::new(ShellCommandRunner::new(self.command_timeout())),
            self.voltage_workaround.clone(),
        )
        .with_vpd_delimiter(self.vpd_delimiter)
    }
}

/// Default settings location
///
/// The system-wide file wins when it exists, otherwise the per-user one.
pub fn get_settings_path() -> PathBuf {
    let system = Path::new(paths::CONFIG_DIR).join(paths::SETTINGS_FILE);
    if system.exists() {
        return system;
    }
    match paths::user_config_dir() {
        Some(dir) => dir.join(paths::SETTINGS_FILE),
        None => system,
    }
}

/// Load settings, falling back to defaults when the file does not exist
pub fn load_settings(path: &Path) -> Result<PsuSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "No settings file, using defaults");
        return Ok(PsuSettings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| PsuError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let settings: PsuSettings = serde_json::from_str(&content)
        .map_err(|e| PsuError::config(format!("Failed to parse settings JSON: {}", e)))?;
    settings.validate()?;

    info!(path = %path.display(), psu_count = settings.psu_count, "Loaded settings");
    Ok(settings)
}

/// Save settings atomically (temp file + rename)
pub fn save_settings(path: &Path, settings: &PsuSettings) -> Result<()> {
    settings.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    let temp_path = path.with_extension("json.tmp");

    let mut file = fs::File::create(&temp_path).map_err(|e| PsuError::FileWrite {
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(json.as_bytes()).map_err(|e| PsuError::FileWrite {
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| PsuError::FileWrite {
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| PsuError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), "Saved settings");
    Ok(())
}
