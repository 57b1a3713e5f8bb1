//! Typed reads from sysfs-style attribute files
//!
//! Every PSU quantity lives in its own file holding a decimal integer in the
//! device's minor unit. A missing, empty or non-numeric file is a normal
//! hardware state (unit unplugged, driver not bound yet), so reads return
//! `Option` and never fail.

use std::fs;
use std::path::Path;
use tracing::trace;

/// Read access to sysfs attribute files
///
/// Implementations must be safe to call concurrently for different paths.
pub trait SysfsAccess: Send + Sync {
    /// Read a decimal integer, `None` when the file is missing or malformed
    fn read_int(&self, path: &Path) -> Option<i64>;

    /// Read the trimmed file contents, `None` when the file is missing
    fn read_str(&self, path: &Path) -> Option<String>;
}

/// Reads attribute files straight from the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct SysfsReader;

impl SysfsReader {
    pub fn new() -> Self {
        Self
    }
}

impl SysfsAccess for SysfsReader {
    fn read_int(&self, path: &Path) -> Option<i64> {
        let content = self.read_str(path)?;
        match content.parse::<i64>() {
            Ok(v) => Some(v),
            Err(e) => {
                trace!(path = %path.display(), content = %content, "Failed to parse sysfs integer: {}", e);
                None
            }
        }
    }

    fn read_str(&self, path: &Path) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) => {
                trace!(path = %path.display(), "Failed to read sysfs file: {}", e);
                None
            }
        }
    }
}

/// Read an asserted/deasserted flag: true iff the file holds exactly `1`
pub fn read_flag(sysfs: &dyn SysfsAccess, path: &Path) -> bool {
    sysfs.read_int(path) == Some(crate::constants::status::ASSERTED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_int_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("psu1_volt");
        fs::write(&path, "12034\n").unwrap();

        assert_eq!(SysfsReader.read_int(&path), Some(12034));
    }

    #[test]
    fn test_read_int_negative() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("psu1_temp");
        fs::write(&path, "-500").unwrap();

        assert_eq!(SysfsReader.read_int(&path), Some(-500));
    }

    #[test]
    fn test_read_int_unavailable() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty");
        let garbage = dir.path().join("garbage");
        fs::write(&empty, "").unwrap();
        fs::write(&garbage, "not a number").unwrap();

        assert_eq!(SysfsReader.read_int(&empty), None);
        assert_eq!(SysfsReader.read_int(&garbage), None);
        assert_eq!(SysfsReader.read_int(&dir.path().join("missing")), None);
    }

    #[test]
    fn test_read_str() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("psu1_volt_capability");
        fs::write(&path, "  min max \n").unwrap();

        assert_eq!(SysfsReader.read_str(&path).as_deref(), Some("min max"));
        assert!(SysfsReader.read_str(&dir.path().join("missing")).is_none());
    }

    #[test]
    fn test_read_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("psu1_status");

        fs::write(&path, "1").unwrap();
        assert!(read_flag(&SysfsReader, &path));

        fs::write(&path, "0").unwrap();
        assert!(!read_flag(&SysfsReader, &path));

        fs::write(&path, "2").unwrap();
        assert!(!read_flag(&SysfsReader, &path));

        assert!(!read_flag(&SysfsReader, &dir.path().join("missing")));
    }
}
