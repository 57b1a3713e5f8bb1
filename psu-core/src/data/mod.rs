//! Serializable data types
//!
//! Snapshot records produced by [`crate::capture`].

mod types;

pub use types::{FanSnapshot, PsuSnapshot, SystemSnapshot};
