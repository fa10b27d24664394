//! Pricewatch data transfer objects, configuration primitives and the unified error type.
#![warn(missing_docs)]

mod capability;
mod config;
mod error;
mod history;
mod product;
mod watchlist;

pub use capability::Capability;
pub use config::{
    CacheConfig, DEFAULT_CACHE_TTL_MS, DEFAULT_WINDOW_DAYS, DealPolicy, TrackerConfig,
};
pub use error::PricewatchError;
pub use history::{CacheEntry, DailyPrices, DealSignal, DealSummary, MergedHistory, PricePoint};
pub use product::{OwnerId, ProductId};
pub use watchlist::WatchlistItem;
