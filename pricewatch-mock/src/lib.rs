use std::time::Duration;

use async_trait::async_trait;
use pricewatch_core::{PriceHistoryProvider, PricewatchError, ProductId, RawPriceHistory};

mod dynamic;
mod fixtures;
mod watchlist;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use watchlist::InMemoryWatchlist;

/// Instant the fixtures are laid out around: 2024-02-01T00:00:00Z.
///
/// Every fixture observation falls inside the trailing 365-day window ending here.
pub const FIXTURE_NOW_MS: i64 = 1_706_745_600_000;

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// A few product ids are reserved to exercise error paths: `FAIL`, `TIMEOUT`,
/// `RATELIMIT` and `NOTFOUND`.
pub struct MockConnector {
    latency: Duration,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Fixture connector with the default 200ms simulated latency.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latency: Duration::from_millis(200),
        }
    }

    /// Override how long `TIMEOUT` takes to answer.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Product ids that have fixture data.
    #[must_use]
    pub fn known_products() -> Vec<ProductId> {
        fixtures::history::known_ids()
            .iter()
            .filter_map(|s| ProductId::new(s).ok())
            .collect()
    }

    async fn maybe_fail_or_timeout(&self, product: &ProductId) -> Result<(), PricewatchError> {
        match product.as_str() {
            "FAIL" => Err(PricewatchError::upstream(
                "pricewatch-mock",
                "forced failure: history",
            )),
            "RATELIMIT" => Err(PricewatchError::rate_limited(
                "pricewatch-mock",
                Some(60_000),
            )),
            "TIMEOUT" => {
                // Answers eventually; the orchestrator may time out first.
                tokio::time::sleep(self.latency).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PriceHistoryProvider for MockConnector {
    fn name(&self) -> &'static str {
        "pricewatch-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn price_history(
        &self,
        product: &ProductId,
    ) -> Result<RawPriceHistory, PricewatchError> {
        self.maybe_fail_or_timeout(product).await?;
        if product.as_str() == "TIMEOUT" {
            return Ok(RawPriceHistory::empty(product.clone()));
        }
        fixtures::history::by_product(product)
            .ok_or_else(|| PricewatchError::not_found(product.as_str()))
    }
}
