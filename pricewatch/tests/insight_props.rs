mod helpers;

use helpers::{dynamic_tracker, pid, raw_daily};
use pricewatch::{Decimal, DealSignal};
use pricewatch_mock::MockBehavior;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn summary_brackets_history_and_latest_price(
        cents in prop::collection::vec(1i64..=100_000, 1..=30),
    ) {
        tokio_test::block_on(async move {
            let (builder, ctrl, _clock) = dynamic_tracker();
            let tracker = builder.build().unwrap();
            ctrl.set_history_behavior(pid("B001"), MockBehavior::Return(raw_daily("B001", &cents)))
                .await;

            let insight = tracker.insight(&pid("B001"), None).await.unwrap();
            let lo = Decimal::new(*cents.iter().min().unwrap(), 2);
            let hi = Decimal::new(*cents.iter().max().unwrap(), 2);
            let latest = Decimal::new(*cents.last().unwrap(), 2);

            assert_eq!(insight.history.len(), cents.len());
            assert_eq!(insight.current_price, Some(latest));
            assert_eq!(insight.summary.lowest, Some(lo));
            assert_eq!(insight.summary.highest, Some(hi));

            let favorable = latest <= lo * Decimal::new(110, 2);
            assert_eq!(insight.summary.signal == DealSignal::Favorable, favorable);
            assert_eq!(insight.recommendation, insight.summary.signal.recommendation());
        });
    }
}
