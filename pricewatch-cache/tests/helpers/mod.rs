#![allow(dead_code)]

use chrono::NaiveDate;
use pricewatch_core::{Decimal, MergedHistory, PricePoint, ProductId};

pub const HOUR_MS: i64 = 60 * 60 * 1000;
pub const T0: i64 = 1_706_745_600_000;

pub fn pid(s: &str) -> ProductId {
    ProductId::new(s).unwrap()
}

/// One-point history priced at `cents` on 2024-01-01.
pub fn history(cents: i64) -> MergedHistory {
    MergedHistory::new(vec![PricePoint {
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        primary_price: Some(Decimal::new(cents, 2)),
        marketplace_price: None,
    }])
    .unwrap()
}
