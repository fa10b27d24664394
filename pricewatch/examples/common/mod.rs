use std::sync::Arc;

use pricewatch::{ManualClock, PricewatchError, Tracker, TrackerBuilder};

/// Keepa when `KEEPA_API_KEY` is set, otherwise the fixture connector pinned
/// to the fixtures' clock.
pub fn tracker_builder() -> Result<TrackerBuilder, PricewatchError> {
    if std::env::var(pricewatch_keepa::API_KEY_ENV).is_ok() {
        let keepa = pricewatch_keepa::KeepaConnector::from_env()?;
        Ok(Tracker::builder().provider(Arc::new(keepa)))
    } else {
        println!("--- (Using Mock Connector; set KEEPA_API_KEY for live data) ---");
        Ok(Tracker::builder()
            .provider(Arc::new(pricewatch_mock::MockConnector::new()))
            .clock(Arc::new(ManualClock::new(pricewatch_mock::FIXTURE_NOW_MS))))
    }
}
