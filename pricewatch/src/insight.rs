use std::sync::Arc;

use pricewatch_core::{Decimal, DealSummary, MergedHistory, PricewatchError, ProductId, classify};
use serde::Serialize;

use crate::Tracker;

/// Everything a product page needs to render the price panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInsight {
    /// Product the insight describes.
    pub product_id: ProductId,
    /// Title reported by the provider, if any.
    pub title: Option<String>,
    /// Price the summary was computed against.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current_price: Option<Decimal>,
    /// Merged history the summary was computed from.
    pub history: Arc<MergedHistory>,
    /// Lowest/highest prices in the window and the derived signal.
    pub summary: DealSummary,
    /// Buying advice for `summary.signal`.
    pub recommendation: &'static str,
}

impl Tracker {
    /// History, deal summary and advice for `product`.
    ///
    /// `current_price` is the price shown on the page; when `None` the newest
    /// price in the history is used. With no usable price at all the summary
    /// is the neutral degraded state.
    ///
    /// # Errors
    /// Same as [`history`](Self::history).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pricewatch::insight",
            skip(self, product),
            fields(product = %product),
        )
    )]
    pub async fn insight(
        &self,
        product: &ProductId,
        current_price: Option<Decimal>,
    ) -> Result<ProductInsight, PricewatchError> {
        let history = self.history(product).await?;
        let current_price = current_price.or_else(|| history.latest_price());
        let summary = current_price.map_or_else(DealSummary::unavailable, |price| {
            classify(price, &history, &self.cfg.deal_policy)
        });
        Ok(ProductInsight {
            product_id: product.clone(),
            title: self.title(product).await,
            current_price,
            history,
            summary,
            recommendation: summary.signal.recommendation(),
        })
    }
}
