//! pricewatch-core
//!
//! Core types, traits, and the price-history pipeline shared across the
//! pricewatch workspace.
//!
//! - `types`: re-exports of the DTOs from `pricewatch-types`.
//! - `connector`: the `PriceHistoryProvider` and `WatchlistStore` traits.
//! - `timeseries`: vendor time base, raw channel parsing and the dual-channel merge.
//! - `deal`: the three-tier deal classifier.
//! - `clock`: injectable "now" for the merge and cache layers.
//!
//! Merge and classification are synchronous and pure; they never suspend and
//! can be called from any async orchestration as leaf calls.
#![warn(missing_docs)]

/// Injectable wall clock.
pub mod clock;
/// Collaborator traits implemented by price-data fetchers and watchlist stores.
pub mod connector;
/// Deal classification against a merged history.
pub mod deal;
/// Time-series utilities for decoding and merging vendor price channels.
pub mod timeseries;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use connector::{PriceHistoryProvider, RawPriceHistory, WatchlistStore};
pub use deal::{classify, classify_against};
pub use timeseries::merge::{MS_PER_DAY, merge_price_channels, merge_series, merge_series_with};
pub use timeseries::raw::{Channel, NO_DATA, RawChannelSeries, TimeBase};
pub use types::*;
