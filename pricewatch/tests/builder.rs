mod helpers;

use std::time::Duration;

use pricewatch::{CacheConfig, DealPolicy, Decimal, PricewatchError, Tracker, TrackerConfig};

#[test]
fn provider_is_required() {
    let err = Tracker::builder().build().err().expect("no provider");
    assert!(matches!(err, PricewatchError::InvalidArg(_)));
}

#[test]
fn defaults_match_documented_values() {
    let tracker = helpers::fixture_tracker().build().unwrap();
    let cfg = tracker.config();
    assert_eq!(cfg.window_days, 365);
    assert_eq!(cfg.cache.ttl_ms, 6 * 60 * 60 * 1000);
    assert_eq!(cfg.provider_timeout, Duration::from_secs(10));
    assert_eq!(cfg.deal_policy, DealPolicy::default());
}

#[test]
fn builder_setters_override_config() {
    let policy = DealPolicy::new(Decimal::new(5, 2), Decimal::new(80, 2)).unwrap();
    let tracker = helpers::fixture_tracker()
        .config(TrackerConfig::default())
        .window_days(90)
        .deal_policy(policy)
        .cache_config(CacheConfig {
            ttl_ms: 0,
            max_entries: 16,
        })
        .provider_timeout(Duration::from_millis(250))
        .build()
        .unwrap();

    let cfg = tracker.config();
    assert_eq!(cfg.window_days, 90);
    assert_eq!(cfg.deal_policy, policy);
    assert_eq!(tracker.cache().config().max_entries, 16);
    assert_eq!(cfg.provider_timeout, Duration::from_millis(250));
}

#[tokio::test]
async fn disabled_cache_fetches_every_time() {
    let (builder, ctrl, _clock) = helpers::dynamic_tracker();
    let tracker = builder
        .cache_config(CacheConfig {
            ttl_ms: 0,
            max_entries: 16,
        })
        .build()
        .unwrap();
    ctrl.set_history_behavior(
        helpers::pid("B001"),
        pricewatch_mock::MockBehavior::Return(helpers::raw_daily("B001", &[100])),
    )
    .await;

    tracker.history(&helpers::pid("B001")).await.unwrap();
    tracker.history(&helpers::pid("B001")).await.unwrap();
    assert_eq!(ctrl.calls(&helpers::pid("B001")).await, 2);
}
