//! Vital product data parsing
//!
//! The PSU EEPROM is exported by the platform driver as a small text file,
//! one `KEY = VALUE` pair per line. It only changes when the PSU is swapped or
//! its firmware reprogrammed, so the parsed mapping is cached and re-validated
//! against the file's modification time on every access.
//!
//! # Cache rules
//!
//! - file cannot be stat'ed: cache and stored mtime are cleared
//! - stored mtime unset or different: file is re-read and re-parsed
//! - stored mtime equal: cached mapping is used as-is

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

use crate::constants::vpd;
use crate::error::{PsuError, Result};

#[derive(Debug, Default)]
struct VpdCache {
    last_mtime: Option<SystemTime>,
    entries: HashMap<String, String>,
}

impl VpdCache {
    fn clear(&mut self) {
        self.last_mtime = None;
        self.entries.clear();
    }
}

/// Mtime-validated parser for one VPD file
#[derive(Debug)]
pub struct VpdParser {
    path: PathBuf,
    delimiter: char,
    cache: Mutex<VpdCache>,
}

impl VpdParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_delimiter(path, vpd::DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            path: path.into(),
            delimiter,
            cache: Mutex::new(VpdCache::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the parser at a different file; the cache starts over
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
        self.cache.get_mut().clear();
    }

    /// Look up a single field
    ///
    /// Fails with [`PsuError::VpdKeyNotFound`] when the field is absent, which
    /// includes the file being missing or unreadable.
    pub fn get_entry_value(&self, key: &str) -> Result<String> {
        let mut cache = self.cache.lock();
        self.refresh(&mut cache);
        match cache.entries.get(key) {
            Some(value) => Ok(value.clone()),
            None => {
                if cache.last_mtime.is_some() {
                    info!(path = %self.path.display(), key, "VPD field missing");
                }
                Err(PsuError::vpd_key_not_found(key, &self.path))
            }
        }
    }

    /// Snapshot of every parsed field
    pub fn entries(&self) -> HashMap<String, String> {
        let mut cache = self.cache.lock();
        self.refresh(&mut cache);
        cache.entries.clone()
    }

    fn refresh(&self, cache: &mut VpdCache) {
        let mtime = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(e) => {
                if cache.last_mtime.is_some() {
                    debug!(path = %self.path.display(), "VPD file no longer readable: {}", e);
                }
                cache.clear();
                return;
            }
        };

        if cache.last_mtime == Some(mtime) {
            return;
        }

        match fs::read_to_string(&self.path) {
            Ok(content) => {
                cache.entries = parse_vpd(&content, self.delimiter);
                cache.last_mtime = Some(mtime);
                debug!(
                    path = %self.path.display(),
                    fields = cache.entries.len(),
                    "Parsed VPD"
                );
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to read VPD file: {}", e);
                cache.clear();
            }
        }
    }
}

/// Parse VPD text into a field mapping
///
/// Lines are split on the first delimiter and both sides trimmed. Lines
/// without a delimiter or with an empty key (comments, checksum footers)
/// are skipped. A repeated key keeps its last value.
pub fn parse_vpd(content: &str, delimiter: char) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| line.split_once(delimiter))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
