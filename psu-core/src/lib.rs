//! psumon Core Library
//!
//! Power supply monitoring for network switch platforms that export PSU
//! telemetry through a hw-management sysfs tree.
//!
//! # Features
//!
//! - **Sensor readings**: voltage, current, power and temperature, scaled to
//!   physical units and gated on the PSU's power-good signal
//! - **Identity**: model, serial and revision from the PSU's VPD, cached until
//!   the VPD file changes
//! - **Firmware workaround**: detects the invalid voltage threshold some PSU
//!   firmware reports and re-scans the sensor bus on affected platforms
//! - **Fixed PSUs**: platforms without a PSU sensor bus expose the same contract
//!
//! # Module Structure
//!
//! - `psu/` - PSU models and the hw-management file layout
//! - `data/` - Serializable snapshot types
//! - `vpd`, `sysfs`, `scale` - Low-level reading and parsing
//! - `workaround`, `platform`, `command` - Invalid voltage threshold handling
//!
//! # Example
//!
//! ```no_run
//! use psu_core::{build_psus, load_settings, get_settings_path};
//!
//! let settings = load_settings(&get_settings_path()).unwrap();
//! let psus = build_psus(&settings, &settings.context());
//! for psu in &psus {
//!     println!("{}: {:?} V", psu.get_name(), psu.get_voltage());
//! }
//! ```

// Grouped modules
pub mod data;
pub mod psu;

// Standalone modules
pub mod capture;
pub mod command;
pub mod constants;
pub mod error;
pub mod fan;
pub mod platform;
pub mod scale;
pub mod settings;
pub mod sysfs;
pub mod vpd;
pub mod workaround;

// Re-export error types
pub use error::{PsuError, Result};

// Re-export PSU models
pub use psu::{
    build_psus, FixedPowerSupply, PowerSupply, PsuContext, PsuDevice, PsuLayout, PsuPaths,
};
pub use fan::PsuFan;

// Re-export low-level building blocks
pub use command::{CommandRunner, ShellCommandRunner};
pub use platform::{MachineConfPlatform, PlatformIdentity, StaticPlatform};
pub use scale::{scale_raw, Quantity};
pub use sysfs::{SysfsAccess, SysfsReader};
pub use vpd::{parse_vpd, VpdParser};
pub use workaround::{InvalidVoltagePolicy, WorkaroundEnv};

// Re-export snapshot types and functions
pub use capture::{capture_psu, capture_snapshot, snapshot_to_json, snapshot_to_json_compact};
pub use data::{FanSnapshot, PsuSnapshot, SystemSnapshot};

// Re-export settings
pub use settings::{get_settings_path, load_settings, save_settings, PsuSettings};
