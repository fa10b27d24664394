use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;

use crate::timeseries::raw::{Channel, NO_DATA, RawChannelSeries, TimeBase};
use crate::{DailyPrices, MergedHistory, PricewatchError};

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Closed interval `[start_ms, now_ms]` of accepted observation instants.
#[derive(Debug, Clone, Copy)]
struct Window {
    start_ms: i64,
    end_ms: i64,
}

impl Window {
    fn trailing(window_days: u32, now_ms: i64) -> Self {
        let span = i64::from(window_days).saturating_mul(MS_PER_DAY);
        Self {
            start_ms: now_ms.saturating_sub(span),
            end_ms: now_ms,
        }
    }

    const fn contains(self, ms: i64) -> bool {
        self.start_ms <= ms && ms <= self.end_ms
    }
}

/// Merge two vendor-encoded flat channels into a per-day history.
///
/// `primary` and `marketplace` use the interleaved `[t0, p0, t1, p1, ...]`
/// encoding with Keepa time and integer cents.
///
/// # Errors
/// Returns `PricewatchError::InvalidSeriesShape` if either array has odd length.
/// Sentinels, duplicates and out-of-window points are not errors.
pub fn merge_price_channels(
    primary: &[i64],
    marketplace: &[i64],
    window_days: u32,
    now_ms: i64,
) -> Result<MergedHistory, PricewatchError> {
    let primary = RawChannelSeries::from_flat(Channel::Primary, primary)?;
    let marketplace = RawChannelSeries::from_flat(Channel::Marketplace, marketplace)?;
    Ok(merge_series(&primary, &marketplace, window_days, now_ms))
}

/// Merge two Keepa-timed channels into a per-day history over the trailing window.
#[must_use]
pub fn merge_series(
    primary: &RawChannelSeries,
    marketplace: &RawChannelSeries,
    window_days: u32,
    now_ms: i64,
) -> MergedHistory {
    merge_series_with(TimeBase::KEEPA, primary, marketplace, window_days, now_ms)
}

/// Merge two channels using an explicit vendor time base.
///
/// - Sentinel prices (`NO_DATA`) are dropped before bucketing.
/// - Instants outside `[now - window_days, now]` are dropped.
/// - Each channel is bucketed by UTC calendar day; the last pair for a day wins.
/// - Prices are integer cents and become two-place decimals.
/// - The output covers the union of days from both channels, ascending.
#[must_use]
pub fn merge_series_with(
    time_base: TimeBase,
    primary: &RawChannelSeries,
    marketplace: &RawChannelSeries,
    window_days: u32,
    now_ms: i64,
) -> MergedHistory {
    let window = Window::trailing(window_days, now_ms);
    let primary_days = bucket_by_day(primary, time_base, window);
    let marketplace_days = bucket_by_day(marketplace, time_base, window);

    let mut daily: DailyPrices = BTreeMap::new();
    for (date, price) in primary_days {
        daily.entry(date).or_default().0 = Some(price);
    }
    for (date, price) in marketplace_days {
        daily.entry(date).or_default().1 = Some(price);
    }

    let merged = MergedHistory::from_daily(daily);
    #[cfg(feature = "tracing")]
    tracing::debug!(
        primary_raw = primary.len(),
        marketplace_raw = marketplace.len(),
        days = merged.len(),
        window_days,
        "merged price channels"
    );
    merged
}

fn bucket_by_day(
    series: &RawChannelSeries,
    time_base: TimeBase,
    window: Window,
) -> BTreeMap<NaiveDate, Decimal> {
    let mut days = BTreeMap::new();
    for (encoded, cents) in series.iter() {
        if cents == NO_DATA {
            continue;
        }
        let Some(ms) = time_base.to_unix_ms(encoded) else {
            continue;
        };
        if !window.contains(ms) {
            continue;
        }
        let Some(ts) = DateTime::from_timestamp_millis(ms) else {
            continue;
        };
        days.insert(ts.date_naive(), Decimal::new(cents, 2));
    }
    days
}
