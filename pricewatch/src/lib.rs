//! pricewatch turns raw vendor price series into buying advice.
//!
//! Overview
//! - A [`PriceHistoryProvider`] returns two raw channels per product: the
//!   primary seller and the marketplace.
//! - The merger drops "no offer" sentinels and points outside the trailing
//!   window, buckets by UTC day and joins both channels into one
//!   [`MergedHistory`].
//! - Histories are cached per product with a TTL; concurrent misses for the
//!   same product share one provider call.
//! - The classifier compares the current price against the window's low and
//!   high and yields a [`DealSignal`].
//!
//! Key behaviors
//! - Provider errors (`UpstreamUnavailable`, `RateLimited`, `ProductNotFound`)
//!   pass through unchanged and are never cached.
//! - Each provider call is bounded by `provider_timeout`; an overrun becomes
//!   `ProviderTimeout`.
//! - Empty or single-point histories are not errors; they classify as
//!   `Neutral` or trivially `Favorable`.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use pricewatch::{ProductId, Tracker};
//! use pricewatch_keepa::KeepaConnector;
//!
//! let tracker = Tracker::builder()
//!     .provider(Arc::new(KeepaConnector::from_env()?))
//!     .build()?;
//!
//! let id = ProductId::new("B0DEMO1234")?;
//! let insight = tracker.insight(&id, None).await?;
//! println!("{}: {}", insight.summary.signal, insight.recommendation);
//! ```
//!
//! See `pricewatch/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod insight;
mod watch;

pub use core::{Tracker, TrackerBuilder};
pub use insight::ProductInsight;
pub use pricewatch_cache::HistoryCache;

// Re-export core types for convenience
pub use pricewatch_core::{
    CacheConfig, CacheEntry, Capability, Clock, DealPolicy, DealSignal, DealSummary, Decimal,
    ManualClock, MergedHistory, OwnerId, PriceHistoryProvider, PricePoint, PricewatchError,
    ProductId, RawPriceHistory, SystemClock, TrackerConfig, WatchlistItem, WatchlistStore,
    classify, merge_price_channels,
};
