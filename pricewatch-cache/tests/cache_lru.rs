mod helpers;

use helpers::{T0, history, pid};
use pricewatch_cache::{HistoryCache, Refreshed};
use pricewatch_core::CacheConfig;

fn small(max_entries: usize) -> HistoryCache {
    HistoryCache::new(CacheConfig {
        max_entries,
        ..CacheConfig::default()
    })
}

#[tokio::test]
async fn capacity_bounds_entries() {
    let cache = small(2);
    cache.put(pid("A1"), history(100), T0).await;
    cache.put(pid("A2"), history(200), T0).await;
    cache.put(pid("A3"), history(300), T0).await;

    assert_eq!(cache.len().await, 2);
    assert!(cache.get(&pid("A1"), T0).await.is_none(), "oldest evicted");
    assert!(cache.get(&pid("A2"), T0).await.is_some());
    assert!(cache.get(&pid("A3"), T0).await.is_some());
}

#[tokio::test]
async fn reads_refresh_recency() {
    let cache = small(2);
    cache.put(pid("A1"), history(100), T0).await;
    cache.put(pid("A2"), history(200), T0).await;
    // Touch A1 so A2 becomes least recently used.
    assert!(cache.get(&pid("A1"), T0).await.is_some());
    cache.put(pid("A3"), history(300), T0).await;

    assert!(cache.get(&pid("A1"), T0).await.is_some());
    assert!(cache.get(&pid("A2"), T0).await.is_none());
}

#[tokio::test]
async fn zero_capacity_is_clamped_to_one() {
    let cache = small(0);
    cache.put(pid("A1"), history(100), T0).await;
    cache.put(pid("A2"), history(200), T0).await;
    assert_eq!(cache.len().await, 1);
    assert!(cache.get(&pid("A2"), T0).await.is_some());
}

#[tokio::test]
async fn titles_are_evicted_with_their_history() {
    let cache = small(1);
    for (id, title) in [("A1", "Lamp"), ("A2", "Cable"), ("A3", "Keyboard")] {
        cache
            .get_or_refresh(&pid(id), T0, move || async move {
                Ok(Refreshed {
                    history: history(100),
                    title: Some(title.to_string()),
                })
            })
            .await
            .unwrap();
    }

    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.title(&pid("A1")).await, None);
    assert_eq!(cache.title(&pid("A2")).await, None);
    assert_eq!(cache.title(&pid("A3")).await.as_deref(), Some("Keyboard"));
}
