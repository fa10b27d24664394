//! Subset of the Keepa `/product` response the connector reads.

use serde::Deserialize;

/// Top-level `/product` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeepaResponse {
    /// Matched products; empty when the ASIN is unknown.
    #[serde(default)]
    pub products: Vec<KeepaProduct>,
    /// Milliseconds until the token bucket refills.
    #[serde(default)]
    pub refill_in: Option<u64>,
    /// Tokens remaining after this request.
    #[serde(default)]
    pub tokens_left: Option<i64>,
}

/// One product entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeepaProduct {
    /// Amazon standard identification number.
    pub asin: String,
    /// Listing title.
    #[serde(default)]
    pub title: Option<String>,
    /// Price-type indexed histories in `[t0, p0, t1, p1, ...]` form; absent types are `null`.
    #[serde(default)]
    pub csv: Vec<Option<Vec<i64>>>,
}

impl KeepaProduct {
    /// Amazon price history.
    pub const CSV_AMAZON: usize = 0;
    /// Marketplace new price history.
    pub const CSV_NEW: usize = 1;

    /// Flat series for a price type; empty when Keepa has none.
    #[must_use]
    pub fn series(&self, index: usize) -> &[i64] {
        self.csv
            .get(index)
            .and_then(Option::as_deref)
            .unwrap_or_default()
    }
}
