#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use pricewatch::{ManualClock, ProductId, RawPriceHistory, Tracker, TrackerBuilder};
use pricewatch_core::{MS_PER_DAY, RawChannelSeries, TimeBase};
use pricewatch_mock::{DynamicMockConnector, DynamicMockController, FIXTURE_NOW_MS};

pub const HOUR_MS: i64 = 60 * 60 * 1000;
/// 2024-01-01T00:00:00Z
pub const JAN_1_2024_MS: i64 = 1_704_067_200_000;
/// 2024-02-01T00:00:00Z
pub const NOW_MS: i64 = FIXTURE_NOW_MS;

pub fn pid(s: &str) -> ProductId {
    ProductId::new(s).unwrap()
}

/// Keepa minutes for `days` after 2024-01-01, at noon UTC.
pub fn keepa_day(days: i64) -> i64 {
    TimeBase::KEEPA.from_unix_ms(JAN_1_2024_MS + days * MS_PER_DAY + 12 * HOUR_MS)
}

/// Raw history with primary prices on consecutive days starting 2024-01-01.
pub fn raw_daily(id: &str, cents: &[i64]) -> RawPriceHistory {
    let primary: RawChannelSeries = cents
        .iter()
        .enumerate()
        .map(|(i, c)| (keepa_day(i as i64), *c))
        .collect();
    RawPriceHistory {
        product_id: pid(id),
        title: Some(format!("Product {id}")),
        primary,
        marketplace: RawChannelSeries::empty(),
    }
}

/// Dynamic mock provider, a manual clock at `NOW_MS` and a builder wired to both.
pub fn dynamic_tracker() -> (TrackerBuilder, DynamicMockController, Arc<ManualClock>) {
    let (provider, controller) = DynamicMockConnector::new_with_controller("P0");
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let builder = Tracker::builder()
        .provider(provider)
        .clock(clock.clone())
        .provider_timeout(Duration::from_secs(2));
    (builder, controller, clock)
}

/// Fixture mock provider with the clock pinned to the fixtures.
pub fn fixture_tracker() -> TrackerBuilder {
    Tracker::builder()
        .provider(Arc::new(pricewatch_mock::MockConnector::new()))
        .clock(Arc::new(ManualClock::new(NOW_MS)))
}
