use std::sync::Arc;
use std::time::Duration;

use pricewatch_cache::{HistoryCache, Refreshed};
use pricewatch_core::{
    CacheConfig, Capability, Clock, DealPolicy, MergedHistory, PriceHistoryProvider,
    PricewatchError, ProductId, SystemClock, TrackerConfig, WatchlistStore, merge_series,
};
/// Orchestrator that fetches, merges, caches and classifies price histories.
///
/// Owns its [`HistoryCache`]; two trackers never share cached state.
pub struct Tracker {
    pub(crate) provider: Arc<dyn PriceHistoryProvider>,
    pub(crate) watchlist: Option<Arc<dyn WatchlistStore>>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) cache: Arc<HistoryCache>,
    pub(crate) cfg: TrackerConfig,
}

/// Builder for constructing a [`Tracker`] with custom configuration.
pub struct TrackerBuilder {
    provider: Option<Arc<dyn PriceHistoryProvider>>,
    watchlist: Option<Arc<dyn WatchlistStore>>,
    clock: Option<Arc<dyn Clock>>,
    cfg: TrackerConfig,
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: 365-day window, 10%/70% deal policy, 6 hour cache TTL,
    /// 1024 cached products, 10s provider timeout, wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            watchlist: None,
            clock: None,
            cfg: TrackerConfig::default(),
        }
    }

    /// Set the price-data provider. Required.
    #[must_use]
    pub fn provider(mut self, p: Arc<dyn PriceHistoryProvider>) -> Self {
        self.provider = Some(p);
        self
    }

    /// Set the watchlist store. Without one, watchlist calls return `Unsupported`.
    #[must_use]
    pub fn watchlist_store(mut self, s: Arc<dyn WatchlistStore>) -> Self {
        self.watchlist = Some(s);
        self
    }

    /// Replace the wall clock, e.g. with a `ManualClock` in tests.
    #[must_use]
    pub fn clock(mut self, c: Arc<dyn Clock>) -> Self {
        self.clock = Some(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: TrackerConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Trailing window, in days, applied when merging.
    #[must_use]
    pub const fn window_days(mut self, days: u32) -> Self {
        self.cfg.window_days = days;
        self
    }

    /// Thresholds for the deal signal.
    #[must_use]
    pub const fn deal_policy(mut self, policy: DealPolicy) -> Self {
        self.cfg.deal_policy = policy;
        self
    }

    /// History cache settings.
    #[must_use]
    pub const fn cache_config(mut self, cache: CacheConfig) -> Self {
        self.cfg.cache = cache;
        self
    }

    /// Set the per-request provider timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Build the `Tracker`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider has been set via [`provider`](Self::provider).
    pub fn build(self) -> Result<Tracker, PricewatchError> {
        let Some(provider) = self.provider else {
            return Err(PricewatchError::InvalidArg(
                "no provider registered; set one via provider(...)".to_string(),
            ));
        };
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        Ok(Tracker {
            provider,
            watchlist: self.watchlist,
            clock,
            cache: Arc::new(HistoryCache::new(self.cfg.cache)),
            cfg: self.cfg,
        })
    }
}

impl Tracker {
    /// Start building a new `Tracker`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use pricewatch::Tracker;
    /// use pricewatch_keepa::KeepaConnector;
    ///
    /// let tracker = Tracker::builder()
    ///     .provider(Arc::new(KeepaConnector::from_env()?))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.cfg
    }

    /// The tracker's history cache, e.g. for snapshots.
    #[must_use]
    pub fn cache(&self) -> &HistoryCache {
        &self.cache
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pricewatch::core::provider_call_with_timeout",
            skip(fut),
            fields(
                provider = provider_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        provider_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, PricewatchError>
    where
        Fut: core::future::Future<Output = Result<T, PricewatchError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(PricewatchError::provider_timeout(provider_name, capability)))
    }

    /// Merged history for `product` over the configured window.
    ///
    /// Served from the cache while fresh. On a miss the provider is called
    /// once, even when several callers ask for the same product concurrently.
    /// Failed fetches are not cached.
    ///
    /// # Errors
    /// Propagates provider errors unchanged; a slow provider yields
    /// `ProviderTimeout`, and a malformed series yields `InvalidSeriesShape`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pricewatch::core::history",
            skip(self, product),
            fields(product = %product),
        )
    )]
    pub async fn history(
        &self,
        product: &ProductId,
    ) -> Result<Arc<MergedHistory>, PricewatchError> {
        let now_ms = self.clock.now_ms();
        let provider = Arc::clone(&self.provider);
        let timeout = self.cfg.provider_timeout;
        let window_days = self.cfg.window_days;
        let id = product.clone();

        let fetch = move || async move {
            let raw = Self::provider_call_with_timeout(
                provider.name(),
                Capability::History.as_str(),
                timeout,
                provider.price_history(&id),
            )
            .await;
            let raw = match raw {
                Ok(raw) => raw,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        product = %id,
                        provider = provider.name(),
                        error = %e,
                        "price history fetch failed"
                    );
                    return Err(e);
                }
            };
            Ok(Refreshed {
                history: merge_series(&raw.primary, &raw.marketplace, window_days, now_ms),
                title: raw.title,
            })
        };
        self.cache.get_or_refresh(product, now_ms, fetch).await
    }

    /// Drop any cached history for `product` and fetch it again.
    ///
    /// # Errors
    /// Same as [`history`](Self::history).
    pub async fn refresh(
        &self,
        product: &ProductId,
    ) -> Result<Arc<MergedHistory>, PricewatchError> {
        self.cache.invalidate(product).await;
        self.history(product).await
    }

    /// Remove stale cache entries; returns how many were dropped.
    pub async fn sweep_cache(&self) -> usize {
        self.cache.sweep_expired(self.clock.now_ms()).await
    }

    /// Title reported by the provider with the cached history of `product`.
    ///
    /// Forgotten when the history leaves the cache; always `None` when
    /// caching is disabled.
    pub async fn title(&self, product: &ProductId) -> Option<String> {
        self.cache.title(product).await
    }

    pub(crate) fn watchlist_store(&self) -> Result<&Arc<dyn WatchlistStore>, PricewatchError> {
        self.watchlist
            .as_ref()
            .ok_or_else(|| PricewatchError::unsupported(Capability::Watchlist.as_str()))
    }
}
