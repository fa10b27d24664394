use chrono::NaiveDate;
use pricewatch_core::{NO_DATA, ProductId, RawChannelSeries, RawPriceHistory, TimeBase};

const KNOWN: &[&str] = &["B001", "B002", "B003"];

pub const fn known_ids() -> &'static [&'static str] {
    KNOWN
}

pub fn by_product(id: &ProductId) -> Option<RawPriceHistory> {
    match id.as_str() {
        // Amazon-only with one marketplace day; latest price is the window high.
        "B001" => Some(build(
            id,
            "Mechanical Keyboard",
            &[
                ("2024-01-01", 2000),
                ("2024-01-10", 2500),
                ("2024-01-20", 3000),
            ],
            &[("2024-01-05", 2300), ("2024-01-10", NO_DATA)],
        )),
        // Marketplace undercuts Amazon; latest price is the window low.
        "B002" => Some(build(
            id,
            "USB-C Cable",
            &[("2024-01-02", 1099)],
            &[("2024-01-02", 999), ("2024-01-03", 899)],
        )),
        // Listed but never had an offer.
        "B003" => Some(build(
            id,
            "Discontinued Lamp",
            &[("2024-01-01", NO_DATA)],
            &[],
        )),
        _ => None,
    }
}

fn keepa_noon(date: &str) -> i64 {
    let ms = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis();
    TimeBase::KEEPA.from_unix_ms(ms)
}

fn series(rows: &[(&str, i64)]) -> RawChannelSeries {
    rows.iter()
        .map(|(date, cents)| (keepa_noon(date), *cents))
        .collect()
}

fn build(
    id: &ProductId,
    title: &str,
    primary: &[(&str, i64)],
    marketplace: &[(&str, i64)],
) -> RawPriceHistory {
    RawPriceHistory {
        product_id: id.clone(),
        title: Some(title.to_string()),
        primary: series(primary),
        marketplace: series(marketplace),
    }
}
