//! Merged price history, deal signals and cache records.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PricewatchError, ProductId};

/// Prices observed on a single calendar day across both sales channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// UTC calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Price offered by the primary seller, if any.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub primary_price: Option<Decimal>,
    /// Price offered by marketplace sellers, if any.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub marketplace_price: Option<Decimal>,
}

impl PricePoint {
    /// Price used for classification: marketplace first, then primary.
    #[must_use]
    pub fn representative_price(&self) -> Option<Decimal> {
        self.marketplace_price.or(self.primary_price)
    }
}

/// Per-day channel prices keyed by date, as produced while merging.
pub type DailyPrices = BTreeMap<NaiveDate, (Option<Decimal>, Option<Decimal>)>;

/// Date-ordered, deduplicated price series restricted to a trailing window.
///
/// Invariants: dates are unique and ascending, and every point carries at
/// least one price. A `MergedHistory` is never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct MergedHistory {
    points: Vec<PricePoint>,
}

impl MergedHistory {
    /// An empty history (no observations in the window).
    #[must_use]
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a history from points supplied by an external source.
    ///
    /// # Errors
    /// Returns `PricewatchError::Data` if dates are not strictly ascending or a
    /// point carries no price at all.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, PricewatchError> {
        for (i, p) in points.iter().enumerate() {
            if p.primary_price.is_none() && p.marketplace_price.is_none() {
                return Err(PricewatchError::Data(format!(
                    "price point {} has no price in either channel",
                    p.date
                )));
            }
            if i > 0 && points[i - 1].date >= p.date {
                return Err(PricewatchError::Data(format!(
                    "price points out of order at {}",
                    p.date
                )));
            }
        }
        Ok(Self { points })
    }

    /// Build a history from per-day channel prices.
    ///
    /// Days with no price in either channel are skipped; ordering and
    /// uniqueness come from the map.
    #[must_use]
    pub fn from_daily(daily: DailyPrices) -> Self {
        let points = daily
            .into_iter()
            .filter(|(_, (p, m))| p.is_some() || m.is_some())
            .map(|(date, (primary_price, marketplace_price))| PricePoint {
                date,
                primary_price,
                marketplace_price,
            })
            .collect();
        Self { points }
    }

    /// Points in ascending date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Iterate points in ascending date order.
    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    /// Number of days with at least one price.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the window contained no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Representative price of every point, oldest first.
    pub fn representative_prices(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().filter_map(PricePoint::representative_price)
    }

    /// Representative price of the newest point.
    #[must_use]
    pub fn latest_price(&self) -> Option<Decimal> {
        self.points
            .iter()
            .rev()
            .find_map(PricePoint::representative_price)
    }

    /// Oldest date in the series.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Newest date in the series.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

impl TryFrom<Vec<PricePoint>> for MergedHistory {
    type Error = PricewatchError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<MergedHistory> for Vec<PricePoint> {
    fn from(h: MergedHistory) -> Self {
        h.points
    }
}

impl<'a> IntoIterator for &'a MergedHistory {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Three-tier classification of the current price against the trailing range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealSignal {
    /// At or near the lowest price in the window.
    Favorable,
    /// Between the favorable and unfavorable thresholds.
    Neutral,
    /// Close to the highest price in the window.
    Unfavorable,
}

impl DealSignal {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorable => "favorable",
            Self::Neutral => "neutral",
            Self::Unfavorable => "unfavorable",
        }
    }

    /// Short buying advice shown next to the signal.
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Favorable => {
                "Buy Now: This is one of the lowest prices we've seen in the past 12 months."
            }
            Self::Neutral => "Consider: The price is reasonable but has been lower in the past.",
            Self::Unfavorable => {
                "Wait: We've seen significantly better prices in the past 12 months."
            }
        }
    }
}

impl fmt::Display for DealSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the deal classifier.
///
/// `lowest`/`highest` are `None` when the history had no usable price, in
/// which case `signal` is `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealSummary {
    /// Lowest representative price in the window.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub lowest: Option<Decimal>,
    /// Highest representative price in the window.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub highest: Option<Decimal>,
    /// Derived signal.
    pub signal: DealSignal,
}

impl DealSummary {
    /// The degraded state used when no price history is available.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            lowest: None,
            highest: None,
            signal: DealSignal::Neutral,
        }
    }
}

/// A cached merged history, serialized as
/// `{ productId, history: PricePoint[], computedAtEpochMs }` plus an optional
/// `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Product the history belongs to.
    pub product_id: ProductId,
    /// Merged history as computed at `computed_at_epoch_ms`.
    pub history: Arc<MergedHistory>,
    /// Unix milliseconds at which the history was computed.
    pub computed_at_epoch_ms: i64,
    /// Product title reported with the history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CacheEntry {
    /// Whether the entry is still fresh at `now_ms` for the given TTL.
    #[must_use]
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: u64) -> bool {
        let age = i128::from(now_ms) - i128::from(self.computed_at_epoch_ms);
        age < i128::from(ttl_ms)
    }
}
