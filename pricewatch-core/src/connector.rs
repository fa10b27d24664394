use async_trait::async_trait;

use crate::timeseries::raw::RawChannelSeries;
use crate::{OwnerId, PricewatchError, ProductId, WatchlistItem};

/// Raw dual-channel price history returned by a price-data provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPriceHistory {
    /// Product the series belong to.
    pub product_id: ProductId,
    /// Product title, when the provider knows it.
    pub title: Option<String>,
    /// Primary-seller channel.
    pub primary: RawChannelSeries,
    /// Marketplace-seller channel.
    pub marketplace: RawChannelSeries,
}

impl RawPriceHistory {
    /// History with both channels empty.
    #[must_use]
    pub const fn empty(product_id: ProductId) -> Self {
        Self {
            product_id,
            title: None,
            primary: RawChannelSeries::empty(),
            marketplace: RawChannelSeries::empty(),
        }
    }
}

/// Focused role trait for connectors that fetch raw price history.
///
/// Implementations own retries and backoff; the pipeline propagates
/// `UpstreamUnavailable`, `RateLimited` and `ProductNotFound` unchanged.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Stable connector name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Vendor label; defaults to the connector name.
    fn vendor(&self) -> &'static str {
        self.name()
    }

    /// Fetch both price channels for a product.
    async fn price_history(&self, product: &ProductId)
    -> Result<RawPriceHistory, PricewatchError>;
}

/// Persistence for per-owner watchlists.
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Insert an item, replacing any existing entry for the same product.
    async fn add(&self, owner: &OwnerId, item: WatchlistItem) -> Result<(), PricewatchError>;

    /// Remove a product from the owner's watchlist; removing an absent product is not an error.
    async fn remove(&self, owner: &OwnerId, product: &ProductId) -> Result<(), PricewatchError>;

    /// All items saved by the owner.
    async fn list(&self, owner: &OwnerId) -> Result<Vec<WatchlistItem>, PricewatchError>;

    /// Whether the owner is watching the product.
    async fn contains(
        &self,
        owner: &OwnerId,
        product: &ProductId,
    ) -> Result<bool, PricewatchError> {
        Ok(self
            .list(owner)
            .await?
            .iter()
            .any(|item| &item.product_id == product))
    }
}
