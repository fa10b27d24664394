//! Configuration types shared by the tracker, the cache and connectors.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PricewatchError;

/// Six hours, the freshness window used for cached price histories.
pub const DEFAULT_CACHE_TTL_MS: u64 = 6 * 60 * 60 * 1000;

/// Trailing window applied to merged histories.
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Threshold policy for the three-tier deal signal.
///
/// - `near_lowest = lowest * (1 + low_margin_ratio)`
/// - `near_highest = highest * high_margin_ratio`
///
/// The canonical policy is 10% above the trailing low and 70% of the trailing
/// high. Other ratios are configuration, not a different algorithm.
///
/// Ratios are never negative; deserialization goes through [`DealPolicy::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DealPolicyRepr")]
pub struct DealPolicy {
    low_margin_ratio: Decimal,
    high_margin_ratio: Decimal,
}

#[derive(Deserialize)]
struct DealPolicyRepr {
    low_margin_ratio: Decimal,
    high_margin_ratio: Decimal,
}

impl TryFrom<DealPolicyRepr> for DealPolicy {
    type Error = PricewatchError;

    fn try_from(r: DealPolicyRepr) -> Result<Self, Self::Error> {
        Self::new(r.low_margin_ratio, r.high_margin_ratio)
    }
}

impl DealPolicy {
    /// Build a policy from explicit ratios.
    ///
    /// # Errors
    /// Returns `PricewatchError::InvalidArg` if either ratio is negative.
    pub fn new(
        low_margin_ratio: Decimal,
        high_margin_ratio: Decimal,
    ) -> Result<Self, PricewatchError> {
        if low_margin_ratio < Decimal::ZERO {
            return Err(PricewatchError::InvalidArg(format!(
                "low_margin_ratio must be >= 0, got {low_margin_ratio}"
            )));
        }
        if high_margin_ratio < Decimal::ZERO {
            return Err(PricewatchError::InvalidArg(format!(
                "high_margin_ratio must be >= 0, got {high_margin_ratio}"
            )));
        }
        Ok(Self {
            low_margin_ratio,
            high_margin_ratio,
        })
    }

    /// Margin above the lowest observed price that still counts as favorable.
    #[must_use]
    pub const fn low_margin_ratio(&self) -> Decimal {
        self.low_margin_ratio
    }

    /// Fraction of the highest observed price above which a price is unfavorable.
    #[must_use]
    pub const fn high_margin_ratio(&self) -> Decimal {
        self.high_margin_ratio
    }
}

impl Default for DealPolicy {
    fn default() -> Self {
        Self {
            low_margin_ratio: Decimal::new(10, 2),
            high_margin_ratio: Decimal::new(70, 2),
        }
    }
}

/// Configuration for the per-product history cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in milliseconds. `0` disables caching.
    pub ttl_ms: u64,
    /// Maximum number of products kept; least recently used entries are evicted.
    pub max_entries: usize,
}

impl CacheConfig {
    /// TTL as a `Duration`, or `None` when caching is disabled.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        if self.ttl_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.ttl_ms))
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_CACHE_TTL_MS,
            max_entries: 1024,
        }
    }
}

/// Global configuration for the `Tracker` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Trailing window, in days, for merged histories.
    pub window_days: u32,
    /// Thresholds used to derive the deal signal.
    pub deal_policy: DealPolicy,
    /// History cache settings.
    pub cache: CacheConfig,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            deal_policy: DealPolicy::default(),
            cache: CacheConfig::default(),
            provider_timeout: Duration::from_secs(10),
        }
    }
}
