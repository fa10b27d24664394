use pricewatch_types::{OwnerId, PricewatchError, ProductId};

#[test]
fn product_ids_are_trimmed_and_uppercased() {
    let id = ProductId::new("  b07xyz1234 ").unwrap();
    assert_eq!(id.as_str(), "B07XYZ1234");
    assert_eq!(id, "B07XYZ1234".parse::<ProductId>().unwrap());
}

#[test]
fn invalid_product_ids_are_rejected() {
    for bad in ["", "   ", "B07-XYZ", "B07 XYZ", "ÄSIN"] {
        let err = ProductId::new(bad).unwrap_err();
        assert!(matches!(err, PricewatchError::InvalidArg(_)), "{bad:?}");
    }
    assert!(serde_json::from_str::<ProductId>("\"bad id\"").is_err());
}

#[test]
fn owner_ids_must_not_be_blank() {
    assert!(OwnerId::new("user-1").is_ok());
    assert!(OwnerId::new(" ").is_err());
}

#[test]
fn error_classification() {
    assert!(!PricewatchError::not_found("B001").is_actionable());
    assert!(!PricewatchError::unsupported("watchlist").is_actionable());
    assert!(PricewatchError::invalid_shape("primary", 3).is_actionable());

    assert!(PricewatchError::rate_limited("keepa", Some(60_000)).is_retryable());
    assert!(PricewatchError::upstream("keepa", "502").is_retryable());
    assert!(PricewatchError::provider_timeout("keepa", "history").is_retryable());
    assert!(!PricewatchError::not_found("B001").is_retryable());
}
