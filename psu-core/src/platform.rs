//! Platform identity lookup
//!
//! The platform name (e.g. `x86_64-mlnx_msn3700-r0`) decides whether a
//! firmware workaround applies. It comes from the `PLATFORM` environment
//! variable when set, otherwise from the installer's machine.conf.

use std::fs;
use std::path::PathBuf;
use tracing::trace;

use crate::constants::{paths, platform};

/// Source of the platform/SKU name
#[cfg_attr(test, mockall::automock)]
pub trait PlatformIdentity: Send + Sync {
    /// Platform name, `None` when it cannot be determined
    fn platform_name(&self) -> Option<String>;
}

/// Resolves the platform from the environment or machine.conf
#[derive(Debug, Clone)]
pub struct MachineConfPlatform {
    machine_conf: PathBuf,
}

impl MachineConfPlatform {
    pub fn new(machine_conf: impl Into<PathBuf>) -> Self {
        Self {
            machine_conf: machine_conf.into(),
        }
    }

    fn from_machine_conf(&self) -> Option<String> {
        let content = match fs::read_to_string(&self.machine_conf) {
            Ok(c) => c,
            Err(e) => {
                trace!(path = %self.machine_conf.display(), "machine.conf not readable: {}", e);
                return None;
            }
        };
        parse_machine_conf(&content)
    }
}

impl Default for MachineConfPlatform {
    fn default() -> Self {
        Self::new(paths::MACHINE_CONF)
    }
}

impl PlatformIdentity for MachineConfPlatform {
    fn platform_name(&self) -> Option<String> {
        if let Ok(name) = std::env::var(platform::ENV_VAR) {
            let name = name.trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
        self.from_machine_conf()
    }
}

/// Fixed platform name, used when the name is configured explicitly
#[derive(Debug, Clone, Default)]
pub struct StaticPlatform(Option<String>);

impl StaticPlatform {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn unknown() -> Self {
        Self(None)
    }
}

impl PlatformIdentity for StaticPlatform {
    fn platform_name(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Extract the platform name from machine.conf content
///
/// Keys are tried in [`platform::MACHINE_CONF_KEYS`] order.
pub fn parse_machine_conf(content: &str) -> Option<String> {
    platform::MACHINE_CONF_KEYS.iter().find_map(|wanted| {
        content.lines().find_map(|line| {
            let (key, value) = line.split_once('=')?;
            let value = value.trim();
            (key.trim() == *wanted && !value.is_empty()).then(|| value.to_string())
        })
    })
}
