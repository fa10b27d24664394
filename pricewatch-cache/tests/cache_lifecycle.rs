mod helpers;

use helpers::{HOUR_MS, T0, history, pid};
use pricewatch_cache::HistoryCache;
use pricewatch_core::{CacheConfig, CacheEntry};

#[tokio::test]
async fn sweep_removes_only_stale_entries() {
    let cache = HistoryCache::new(CacheConfig::default());
    cache.put(pid("OLD1"), history(100), T0).await;
    cache.put(pid("OLD2"), history(200), T0 + HOUR_MS).await;
    cache.put(pid("NEW1"), history(300), T0 + 5 * HOUR_MS).await;

    let removed = cache.sweep_expired(T0 + 7 * HOUR_MS).await;
    assert_eq!(removed, 2);
    assert_eq!(cache.len().await, 1);
    assert!(cache.get(&pid("NEW1"), T0 + 7 * HOUR_MS).await.is_some());
    assert_eq!(cache.sweep_expired(T0 + 7 * HOUR_MS).await, 0);
}

#[tokio::test]
async fn dispose_clears_everything() {
    let cache = HistoryCache::new(CacheConfig::default());
    cache.put(pid("A1"), history(100), T0).await;
    cache.put(pid("A2"), history(200), T0).await;
    cache.dispose().await;
    assert!(cache.is_empty().await);
    assert_eq!(cache.pending_refreshes().await, 0);
}

#[tokio::test]
async fn snapshot_restores_ages_and_recency() {
    let cache = HistoryCache::new(CacheConfig {
        max_entries: 2,
        ..CacheConfig::default()
    });
    cache.put(pid("A1"), history(100), T0).await;
    cache.put(pid("A2"), history(200), T0 + HOUR_MS).await;

    let snap = cache.snapshot().await;
    let ids: Vec<&str> = snap.iter().map(|e| e.product_id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "A2"], "least recently used first");

    let json = serde_json::to_string(&snap).unwrap();
    let restored_entries: Vec<CacheEntry> = serde_json::from_str(&json).unwrap();

    let restored = HistoryCache::new(CacheConfig {
        max_entries: 2,
        ..CacheConfig::default()
    });
    restored.restore(restored_entries).await;

    // Recency survives: A1 is least recently used and goes first.
    restored.put(pid("A3"), history(300), T0 + HOUR_MS).await;
    assert!(restored.get(&pid("A1"), T0 + HOUR_MS).await.is_none());

    // A2 keeps its original computation time.
    assert!(restored.get(&pid("A2"), T0 + 6 * HOUR_MS).await.is_some());
    assert!(restored.get(&pid("A2"), T0 + 7 * HOUR_MS).await.is_none());
}
