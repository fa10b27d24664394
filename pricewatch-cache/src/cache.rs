use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared, TryFutureExt};
use lru::LruCache;
use pricewatch_core::{CacheConfig, CacheEntry, MergedHistory, PricewatchError, ProductId};
use tokio::sync::Mutex;

/// Value produced by a refresh: the merged history and the product title the
/// provider reported with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refreshed {
    /// Merged history to store.
    pub history: MergedHistory,
    /// Product title, if the provider sent one.
    pub title: Option<String>,
}

impl From<MergedHistory> for Refreshed {
    fn from(history: MergedHistory) -> Self {
        Self {
            history,
            title: None,
        }
    }
}

#[derive(Clone)]
struct Fetched {
    history: Arc<MergedHistory>,
    title: Option<String>,
}

impl From<Refreshed> for Fetched {
    fn from(r: Refreshed) -> Self {
        Self {
            history: Arc::new(r.history),
            title: r.title,
        }
    }
}

type Refresh = Shared<BoxFuture<'static, Result<Fetched, PricewatchError>>>;
type Entries = Arc<Mutex<LruCache<ProductId, Slot>>>;
type Flights = Arc<Mutex<HashMap<ProductId, Flight>>>;

struct Slot {
    history: Arc<MergedHistory>,
    title: Option<String>,
    computed_at_epoch_ms: i64,
}

impl Slot {
    fn is_fresh(&self, now_ms: i64, ttl_ms: u64) -> bool {
        within_ttl(self.computed_at_epoch_ms, now_ms, ttl_ms)
    }
}

struct Flight {
    started_at_ms: i64,
    refresh: Refresh,
}

fn within_ttl(since_ms: i64, now_ms: i64, ttl_ms: u64) -> bool {
    let age = i128::from(now_ms) - i128::from(since_ms);
    age < i128::from(ttl_ms)
}

/// Retire `flight` if it is still the registered refresh for `product`, storing
/// a successful result as computed at the flight's start.
async fn settle(
    entries: &Entries,
    flights: &Flights,
    ttl_ms: u64,
    product: &ProductId,
    flight: &Refresh,
    outcome: &Result<Fetched, PricewatchError>,
) {
    let mut guard = flights.lock().await;
    let started_at_ms = match guard.get(product) {
        Some(current) if current.refresh.ptr_eq(flight) => current.started_at_ms,
        _ => return,
    };
    guard.remove(product);
    if ttl_ms == 0 {
        return;
    }
    if let Ok(fetched) = outcome {
        entries.lock().await.put(
            product.clone(),
            Slot {
                history: Arc::clone(&fetched.history),
                title: fetched.title.clone(),
                computed_at_epoch_ms: started_at_ms,
            },
        );
    }
}

/// Cache of merged histories keyed by product.
///
/// - `get` returns an entry only while `now - computed_at < ttl`; stale entries
///   are dropped on access.
/// - `put` overwrites unconditionally; there is at most one entry per product.
/// - At most `max_entries` products are kept, least recently used first out.
///   Titles live in the same slot and are evicted with their history.
/// - `get_or_refresh` shares one in-flight refresh between concurrent callers.
///   Each refresh runs to completion on its own task, so cancelled callers
///   never leave it behind, and callers never join a refresh older than the TTL.
///
/// Lock order is in-flight map, then entries.
pub struct HistoryCache {
    entries: Entries,
    in_flight: Flights,
    cfg: CacheConfig,
}

impl HistoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new(cfg: CacheConfig) -> Self {
        // Avoid zero capacity panics
        let cap = NonZeroUsize::new(cfg.max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(cap))),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            cfg,
        }
    }

    /// Configuration the cache was created with.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.cfg
    }

    /// Fresh history for `product`, if any.
    pub async fn get(&self, product: &ProductId, now_ms: i64) -> Option<Arc<MergedHistory>> {
        if self.cfg.ttl_ms == 0 {
            return None;
        }
        let mut guard = self.entries.lock().await;
        let fresh = guard.peek(product)?.is_fresh(now_ms, self.cfg.ttl_ms);
        if fresh {
            return guard.get(product).map(|slot| Arc::clone(&slot.history));
        }
        guard.pop(product);
        #[cfg(feature = "tracing")]
        tracing::debug!(product = %product, "dropping stale history");
        None
    }

    /// Insert or overwrite the history for `product`, computed at `now_ms`.
    pub async fn put(
        &self,
        product: ProductId,
        history: impl Into<Arc<MergedHistory>>,
        now_ms: i64,
    ) {
        if self.cfg.ttl_ms == 0 {
            return;
        }
        let slot = Slot {
            history: history.into(),
            title: None,
            computed_at_epoch_ms: now_ms,
        };
        let mut guard = self.entries.lock().await;
        guard.put(product, slot);
    }

    /// Title stored with the history of `product`, stale or not.
    ///
    /// Does not count as a use for LRU ordering.
    pub async fn title(&self, product: &ProductId) -> Option<String> {
        self.entries.lock().await.peek(product)?.title.clone()
    }

    /// Remove `product` regardless of age. Returns whether an entry existed.
    pub async fn invalidate(&self, product: &ProductId) -> bool {
        self.entries.lock().await.pop(product).is_some()
    }

    /// Remove every stale entry; returns how many were removed.
    pub async fn sweep_expired(&self, now_ms: i64) -> usize {
        let ttl_ms = self.cfg.ttl_ms;
        let mut guard = self.entries.lock().await;
        let stale: Vec<ProductId> = guard
            .iter()
            .filter(|(_, slot)| !slot.is_fresh(now_ms, ttl_ms))
            .map(|(k, _)| k.clone())
            .collect();
        for k in &stale {
            guard.pop(k);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(removed = stale.len(), "swept stale histories");
        stale.len()
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Number of refreshes currently in flight.
    pub async fn pending_refreshes(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    /// Drop every entry and forget in-flight refreshes.
    ///
    /// Refreshes that are still running complete for their waiters but are not
    /// stored.
    pub async fn dispose(&self) {
        let mut flights = self.in_flight.lock().await;
        flights.clear();
        self.entries.lock().await.clear();
    }

    /// Export entries, least recently used first, for persistence.
    pub async fn snapshot(&self) -> Vec<CacheEntry> {
        let guard = self.entries.lock().await;
        let mut out: Vec<CacheEntry> = guard
            .iter()
            .map(|(k, slot)| CacheEntry {
                product_id: k.clone(),
                history: Arc::clone(&slot.history),
                title: slot.title.clone(),
                computed_at_epoch_ms: slot.computed_at_epoch_ms,
            })
            .collect();
        out.reverse();
        out
    }

    /// Load persisted entries, keeping their original computation times.
    ///
    /// Entries are inserted in order, so a snapshot restores with the same
    /// recency ranking.
    pub async fn restore<I>(&self, entries: I)
    where
        I: IntoIterator<Item = CacheEntry>,
    {
        if self.cfg.ttl_ms == 0 {
            return;
        }
        let mut guard = self.entries.lock().await;
        for e in entries {
            guard.put(
                e.product_id,
                Slot {
                    history: e.history,
                    title: e.title,
                    computed_at_epoch_ms: e.computed_at_epoch_ms,
                },
            );
        }
    }

    /// Fresh history for `product`, refreshing it at most once across
    /// concurrent callers.
    ///
    /// On a miss the first caller starts `refresh` on a spawned task; callers
    /// arriving while it runs await the same result. A successful result is
    /// stored with the refresh's start time as its computation time, even if
    /// every caller has gone away. Errors are returned to every waiter and are
    /// not stored. A refresh started more than one TTL before `now_ms` is
    /// replaced instead of joined.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns whatever error `refresh` produced.
    pub async fn get_or_refresh<F, Fut, R>(
        &self,
        product: &ProductId,
        now_ms: i64,
        refresh: F,
    ) -> Result<Arc<MergedHistory>, PricewatchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, PricewatchError>> + Send + 'static,
        R: Into<Refreshed> + Send + 'static,
    {
        if let Some(hit) = self.get(product, now_ms).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(product = %product, "history cache hit");
            return Ok(hit);
        }

        let flight = {
            let mut flights = self.in_flight.lock().await;
            // Another caller may have committed between the miss and taking the lock.
            if let Some(hit) = self.get(product, now_ms).await {
                return Ok(hit);
            }
            let joinable = flights
                .get(product)
                .filter(|existing| self.can_join(existing, now_ms))
                .map(|existing| existing.refresh.clone());
            if let Some(existing) = joinable {
                #[cfg(feature = "tracing")]
                tracing::debug!(product = %product, "joining in-flight refresh");
                existing
            } else {
                #[cfg(feature = "tracing")]
                tracing::debug!(product = %product, "history cache miss; refreshing");
                let started: Refresh = refresh()
                    .map_ok(|r: R| {
                        let refreshed: Refreshed = r.into();
                        Fetched::from(refreshed)
                    })
                    .boxed()
                    .shared();
                flights.insert(
                    product.clone(),
                    Flight {
                        started_at_ms: now_ms,
                        refresh: started.clone(),
                    },
                );
                self.drive(product.clone(), started.clone());
                started
            }
        };

        let outcome = flight.clone().await;
        settle(
            &self.entries,
            &self.in_flight,
            self.cfg.ttl_ms,
            product,
            &flight,
            &outcome,
        )
        .await;
        outcome.map(|fetched| fetched.history)
    }

    fn can_join(&self, flight: &Flight, now_ms: i64) -> bool {
        self.cfg.ttl_ms == 0 || within_ttl(flight.started_at_ms, now_ms, self.cfg.ttl_ms)
    }

    fn drive(&self, product: ProductId, flight: Refresh) {
        let entries = Arc::clone(&self.entries);
        let flights = Arc::clone(&self.in_flight);
        let ttl_ms = self.cfg.ttl_ms;
        tokio::spawn(async move {
            let outcome = flight.clone().await;
            settle(&entries, &flights, ttl_ms, &product, &flight, &outcome).await;
        });
    }
}
