use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{DealSignal, ProductId};

/// A product saved to an owner's watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    /// Product being watched.
    pub product_id: ProductId,
    /// Product title as shown on the product page.
    pub title: String,
    /// Price at the time the product was saved.
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    /// Signal at the time the product was saved.
    pub deal_signal: DealSignal,
    /// Product image, if one was extracted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Canonical product page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
}

impl WatchlistItem {
    /// Convenience constructor without image or page links.
    pub fn new(
        product_id: ProductId,
        title: impl Into<String>,
        current_price: Decimal,
        deal_signal: DealSignal,
    ) -> Self {
        Self {
            product_id,
            title: title.into(),
            current_price,
            deal_signal,
            image_url: None,
            product_url: None,
        }
    }

    /// Attach an image URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Attach the product page URL.
    #[must_use]
    pub fn with_product_url(mut self, url: impl Into<String>) -> Self {
        self.product_url = Some(url.into());
        self
    }
}
