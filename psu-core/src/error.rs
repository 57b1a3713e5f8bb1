//! Error types re-exported from psu-error

pub use psu_error::{PsuError, Result};
