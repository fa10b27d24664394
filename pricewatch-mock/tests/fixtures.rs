use std::time::Duration;

use pricewatch_core::{Decimal, PriceHistoryProvider, PricewatchError, ProductId, merge_series};
use pricewatch_mock::{FIXTURE_NOW_MS, MockConnector};

fn pid(s: &str) -> ProductId {
    ProductId::new(s).unwrap()
}

#[tokio::test]
async fn every_known_product_merges_inside_the_window() {
    let mock = MockConnector::new();
    for id in MockConnector::known_products() {
        let raw = mock.price_history(&id).await.expect("fixture");
        assert_eq!(raw.product_id, id);
        assert!(raw.title.is_some());
        let merged = merge_series(&raw.primary, &raw.marketplace, 365, FIXTURE_NOW_MS);
        if id.as_str() == "B003" {
            assert!(merged.is_empty());
        } else {
            assert!(!merged.is_empty(), "{id} should have prices");
        }
    }
}

#[tokio::test]
async fn keyboard_fixture_drops_marketplace_sentinel() {
    let raw = MockConnector::new().price_history(&pid("B001")).await.unwrap();
    let merged = merge_series(&raw.primary, &raw.marketplace, 365, FIXTURE_NOW_MS);
    let prices: Vec<Decimal> = merged.representative_prices().collect();
    assert_eq!(
        prices,
        vec![
            Decimal::new(2000, 2),
            Decimal::new(2300, 2),
            Decimal::new(2500, 2),
            Decimal::new(3000, 2),
        ]
    );
}

#[tokio::test]
async fn reserved_ids_exercise_error_paths() {
    let mock = MockConnector::new().with_latency(Duration::from_millis(5));

    let err = mock.price_history(&pid("FAIL")).await.unwrap_err();
    assert!(matches!(err, PricewatchError::UpstreamUnavailable { .. }));

    let err = mock.price_history(&pid("RATELIMIT")).await.unwrap_err();
    assert_eq!(
        err,
        PricewatchError::rate_limited("pricewatch-mock", Some(60_000))
    );

    let err = mock.price_history(&pid("NOTFOUND")).await.unwrap_err();
    assert_eq!(err, PricewatchError::not_found("NOTFOUND"));

    let raw = mock.price_history(&pid("TIMEOUT")).await.unwrap();
    assert!(raw.primary.is_empty() && raw.marketplace.is_empty());
}
