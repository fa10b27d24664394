use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use pricewatch_core::{OwnerId, PricewatchError, ProductId, WatchlistItem, WatchlistStore};

/// Process-local watchlist store.
///
/// Items keep insertion order; adding a product that is already present
/// replaces it in place.
#[derive(Default)]
pub struct InMemoryWatchlist {
    lists: RwLock<HashMap<OwnerId, Vec<WatchlistItem>>>,
}

impl InMemoryWatchlist {
    /// Empty store with no owners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of owners with at least one item.
    pub async fn owners(&self) -> usize {
        self.lists
            .read()
            .await
            .values()
            .filter(|items| !items.is_empty())
            .count()
    }
}

#[async_trait]
impl WatchlistStore for InMemoryWatchlist {
    async fn add(&self, owner: &OwnerId, item: WatchlistItem) -> Result<(), PricewatchError> {
        let mut guard = self.lists.write().await;
        let items = guard.entry(owner.clone()).or_default();
        match items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
        Ok(())
    }

    async fn remove(&self, owner: &OwnerId, product: &ProductId) -> Result<(), PricewatchError> {
        let mut guard = self.lists.write().await;
        if let Some(items) = guard.get_mut(owner) {
            items.retain(|i| &i.product_id != product);
        }
        Ok(())
    }

    async fn list(&self, owner: &OwnerId) -> Result<Vec<WatchlistItem>, PricewatchError> {
        let guard = self.lists.read().await;
        Ok(guard.get(owner).cloned().unwrap_or_default())
    }

    async fn contains(
        &self,
        owner: &OwnerId,
        product: &ProductId,
    ) -> Result<bool, PricewatchError> {
        let guard = self.lists.read().await;
        Ok(guard
            .get(owner)
            .is_some_and(|items| items.iter().any(|i| &i.product_id == product)))
    }
}
