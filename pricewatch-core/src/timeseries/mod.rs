//! Time-series utilities for vendor price data.
//!
//! Modules include:
//! - `raw`: vendor time base and per-channel raw series
//! - `merge`: window, bucket by day and join the two sales channels
/// Dual-channel merge restricted to a trailing window.
pub mod merge;
/// Raw vendor series and time-base conversion.
pub mod raw;
