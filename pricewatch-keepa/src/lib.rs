//! pricewatch-keepa
//!
//! Connector that implements `PriceHistoryProvider` on top of the Keepa
//! `/product` endpoint. The Amazon price type becomes the primary channel and
//! the marketplace "new" price type becomes the marketplace channel; both are
//! passed through unnormalized for the merger.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;
/// Response shapes.
pub mod wire;

use std::sync::Arc;

use async_trait::async_trait;
use pricewatch_core::{
    Channel, PriceHistoryProvider, PricewatchError, ProductId, RawChannelSeries, RawPriceHistory,
};

use adapter::{KeepaProductApi, PROVIDER};
pub use builder::{API_KEY_ENV, DEFAULT_BASE_URL, DOMAIN_US, KeepaConnectorBuilder};
use wire::{KeepaProduct, KeepaResponse};

/// Public connector type. Production users construct it with [`KeepaConnector::builder`]
/// or [`KeepaConnector::from_env`].
pub struct KeepaConnector {
    api: Arc<dyn KeepaProductApi>,
}

impl KeepaConnector {
    /// Build around an existing adapter, e.g. a fake from `<dyn KeepaProductApi>::from_fn`.
    #[must_use]
    pub fn from_adapter(api: Arc<dyn KeepaProductApi>) -> Self {
        Self { api }
    }

    fn to_raw(
        product: &ProductId,
        resp: KeepaResponse,
    ) -> Result<RawPriceHistory, PricewatchError> {
        let Some(found) = resp.products.into_iter().next() else {
            return Err(PricewatchError::not_found(product.as_str()));
        };
        let primary =
            RawChannelSeries::from_flat(Channel::Primary, found.series(KeepaProduct::CSV_AMAZON))?;
        let marketplace =
            RawChannelSeries::from_flat(Channel::Marketplace, found.series(KeepaProduct::CSV_NEW))?;
        Ok(RawPriceHistory {
            product_id: product.clone(),
            title: found.title.filter(|t| !t.trim().is_empty()),
            primary,
            marketplace,
        })
    }
}

#[async_trait]
impl PriceHistoryProvider for KeepaConnector {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn vendor(&self) -> &'static str {
        "Keepa"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pricewatch_keepa::price_history",
            skip(self, product),
            fields(product = %product),
        )
    )]
    async fn price_history(
        &self,
        product: &ProductId,
    ) -> Result<RawPriceHistory, PricewatchError> {
        let resp = self.api.fetch_product(product.as_str()).await?;
        Self::to_raw(product, resp)
    }
}
