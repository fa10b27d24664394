//! pricewatch-cache
//!
//! Per-product cache of merged price histories.
//!
//! The cache is an explicit instance owned by the orchestration layer. Entries
//! expire after a TTL measured against caller-supplied "now", the number of
//! products is bounded by LRU eviction, and concurrent misses for one product
//! collapse into a single refresh.

mod cache;

pub use crate::cache::{HistoryCache, Refreshed};
