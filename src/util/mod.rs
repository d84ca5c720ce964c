//! Utility functions module
//!
//! Contains helpers for formatting clocks, durations and counters.

pub mod units;

// Re-export commonly used functions
pub use units::{format_clock, format_duration, format_progress, limit_ratio};
