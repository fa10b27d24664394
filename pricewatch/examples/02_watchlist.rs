mod common;

use std::sync::Arc;

use pricewatch::{OwnerId, ProductId, WatchlistItem};
use pricewatch_mock::InMemoryWatchlist;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tracker = common::tracker_builder()?
        .watchlist_store(Arc::new(InMemoryWatchlist::new()))
        .build()?;
    let owner = OwnerId::new("demo-user")?;

    for asin in ["B001", "B002"] {
        let id = ProductId::new(asin)?;
        let insight = tracker.insight(&id, None).await?;
        let Some(price) = insight.current_price else {
            println!("{asin}: no price available, skipping");
            continue;
        };
        let title = insight.title.clone().unwrap_or_else(|| asin.to_string());
        let item = WatchlistItem::new(id, title, price, insight.summary.signal)
            .with_product_url(format!("https://www.amazon.com/dp/{asin}"));
        tracker.watch(&owner, item).await?;
    }

    for item in tracker.watchlist(&owner).await? {
        println!(
            "{:<24} ${:>8}  {}",
            item.title, item.current_price, item.deal_signal
        );
    }
    Ok(())
}
