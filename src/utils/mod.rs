//! Utility functions and helpers
//!
//! This module contains timestamp utilities and atomic file writes.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write, cleanup_temp_file, temp_path_for};
pub use time::{
    current_timestamp_millis, timestamp_from_millis, timestamp_from_millis_f64,
    timestamp_to_millis,
};
