//! Unified error handling for psumon
//!
//! A single error type used across the psumon crates. Most hardware
//! unavailability never reaches this type: sysfs reads surface as `Option`
//! and identity fields as `"N/A"`. What remains is configuration, external
//! command and VPD lookup failures.

use std::io;
use std::path::PathBuf;

/// Result type alias using PsuError
pub type Result<T> = std::result::Result<T, PsuError>;

/// Unified error type for all psumon operations
#[derive(thiserror::Error, Debug)]
pub enum PsuError {
    // ============================================================================
    // I/O and File System Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Vital Product Data
    // ============================================================================
    #[error("VPD key {key} not found in {path}")]
    VpdKeyNotFound {
        key: String,
        path: PathBuf,
    },

    // ============================================================================
    // External Commands
    // ============================================================================
    #[error("Failed to spawn command '{command}': {source}")]
    CommandSpawn {
        command: String,
        source: io::Error,
    },

    #[error("Command '{command}' exited with status {status}")]
    CommandFailed {
        command: String,
        status: String,
    },

    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },
}

impl PsuError {
    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing VPD key error
    pub fn vpd_key_not_found(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::VpdKeyNotFound {
            key: key.into(),
            path: path.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when this error is a missing VPD key rather than an I/O failure
    pub fn is_vpd_key_not_found(&self) -> bool {
        matches!(self, Self::VpdKeyNotFound { .. })
    }
}
