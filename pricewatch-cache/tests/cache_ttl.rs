mod helpers;

use helpers::{HOUR_MS, T0, history, pid};
use pricewatch_cache::HistoryCache;
use pricewatch_core::CacheConfig;

#[tokio::test]
async fn entry_is_served_until_ttl_elapses() {
    let cache = HistoryCache::new(CacheConfig::default());
    cache.put(pid("B001"), history(2000), T0).await;

    let hit = cache.get(&pid("B001"), T0 + 5 * HOUR_MS).await;
    assert_eq!(hit.as_deref(), Some(&history(2000)));

    assert!(cache.get(&pid("B001"), T0 + 7 * HOUR_MS).await.is_none());
    // Stale entries are dropped on access.
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn exactly_ttl_old_is_stale() {
    let cache = HistoryCache::new(CacheConfig::default());
    cache.put(pid("B001"), history(2000), T0).await;
    assert!(cache.get(&pid("B001"), T0 + 6 * HOUR_MS - 1).await.is_some());
    assert!(cache.get(&pid("B001"), T0 + 6 * HOUR_MS).await.is_none());
}

#[tokio::test]
async fn put_overwrites_and_resets_age() {
    let cache = HistoryCache::new(CacheConfig::default());
    cache.put(pid("B001"), history(2000), T0).await;
    cache.put(pid("B001"), history(2100), T0 + 4 * HOUR_MS).await;

    assert_eq!(cache.len().await, 1);
    let hit = cache.get(&pid("B001"), T0 + 9 * HOUR_MS).await;
    assert_eq!(hit.as_deref(), Some(&history(2100)));
}

#[tokio::test]
async fn invalidate_removes_fresh_entry() {
    let cache = HistoryCache::new(CacheConfig::default());
    cache.put(pid("B001"), history(2000), T0).await;
    assert!(cache.invalidate(&pid("B001")).await);
    assert!(!cache.invalidate(&pid("B001")).await);
    assert!(cache.get(&pid("B001"), T0).await.is_none());
}

#[tokio::test]
async fn ttl_zero_disables_caching() {
    let cache = HistoryCache::new(CacheConfig {
        ttl_ms: 0,
        max_entries: 8,
    });
    cache.put(pid("B001"), history(2000), T0).await;
    assert!(cache.get(&pid("B001"), T0).await.is_none());
    assert!(cache.is_empty().await);
}
