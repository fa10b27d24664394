use rust_decimal::Decimal;

use crate::{DealPolicy, DealSignal, DealSummary, MergedHistory};

/// Classify `current_price` against the range of a merged history.
///
/// Each point contributes its marketplace price, or its primary price when the
/// marketplace had no offer. With no usable price the result is
/// [`DealSummary::unavailable`]: no lowest/highest and a neutral signal.
#[must_use]
pub fn classify(
    current_price: Decimal,
    history: &MergedHistory,
    policy: &DealPolicy,
) -> DealSummary {
    let mut prices = history.representative_prices();
    let Some(first) = prices.next() else {
        return DealSummary::unavailable();
    };
    let (lowest, highest) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    DealSummary {
        lowest: Some(lowest),
        highest: Some(highest),
        signal: classify_against(current_price, lowest, highest, policy),
    }
}

/// Classify a price against an explicit `[lowest, highest]` range.
///
/// Boundaries belong to the more favorable tier:
/// - `current <= lowest * (1 + low_margin_ratio)` is favorable
/// - `current <= highest * high_margin_ratio` is neutral
/// - anything above is unfavorable
#[must_use]
pub fn classify_against(
    current_price: Decimal,
    lowest: Decimal,
    highest: Decimal,
    policy: &DealPolicy,
) -> DealSignal {
    // Overflow saturates to the widest threshold.
    let near_lowest = Decimal::ONE
        .checked_add(policy.low_margin_ratio())
        .and_then(|factor| lowest.checked_mul(factor))
        .unwrap_or(Decimal::MAX);
    let near_highest = highest
        .checked_mul(policy.high_margin_ratio())
        .unwrap_or(Decimal::MAX);

    if current_price <= near_lowest {
        DealSignal::Favorable
    } else if current_price <= near_highest {
        DealSignal::Neutral
    } else {
        DealSignal::Unfavorable
    }
}
