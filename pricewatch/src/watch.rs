use pricewatch_core::{OwnerId, PricewatchError, ProductId, WatchlistItem};

use crate::Tracker;

/// Watchlist operations, forwarded to the configured store.
///
/// All of them return `Unsupported("watchlist")` when the tracker was built
/// without a store.
impl Tracker {
    /// Save `item` for `owner`, replacing an existing entry for the same product.
    ///
    /// # Errors
    /// `Unsupported` without a store; otherwise whatever the store reports.
    pub async fn watch(
        &self,
        owner: &OwnerId,
        item: WatchlistItem,
    ) -> Result<(), PricewatchError> {
        self.watchlist_store()?.add(owner, item).await
    }

    /// Remove `product` from `owner`'s watchlist.
    ///
    /// # Errors
    /// `Unsupported` without a store; otherwise whatever the store reports.
    pub async fn unwatch(
        &self,
        owner: &OwnerId,
        product: &ProductId,
    ) -> Result<(), PricewatchError> {
        self.watchlist_store()?.remove(owner, product).await
    }

    /// Everything `owner` is watching.
    ///
    /// # Errors
    /// `Unsupported` without a store; otherwise whatever the store reports.
    pub async fn watchlist(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<WatchlistItem>, PricewatchError> {
        self.watchlist_store()?.list(owner).await
    }

    /// Whether `owner` is watching `product`.
    ///
    /// # Errors
    /// `Unsupported` without a store; otherwise whatever the store reports.
    pub async fn is_watching(
        &self,
        owner: &OwnerId,
        product: &ProductId,
    ) -> Result<bool, PricewatchError> {
        self.watchlist_store()?.contains(owner, product).await
    }
}
