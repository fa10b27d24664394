//! Re-export of foundational types from `pricewatch-types`.
// Consolidated re-exports so downstream crates can depend on `pricewatch-core` only

pub use pricewatch_types::{
    CacheConfig, CacheEntry, Capability, DEFAULT_CACHE_TTL_MS, DEFAULT_WINDOW_DAYS, DailyPrices,
    DealPolicy, DealSignal, DealSummary, MergedHistory, OwnerId, PricePoint, PricewatchError,
    ProductId, TrackerConfig, WatchlistItem,
};

pub use rust_decimal::Decimal;
