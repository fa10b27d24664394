use pricewatch_core::{Decimal, DealSignal, OwnerId, ProductId, WatchlistItem, WatchlistStore};
use pricewatch_mock::InMemoryWatchlist;

fn pid(s: &str) -> ProductId {
    ProductId::new(s).unwrap()
}

fn item(id: &str, cents: i64) -> WatchlistItem {
    WatchlistItem::new(pid(id), format!("Item {id}"), Decimal::new(cents, 2), DealSignal::Neutral)
}

#[tokio::test]
async fn add_is_an_upsert_that_keeps_position() {
    let store = InMemoryWatchlist::new();
    let owner = OwnerId::new("alice").unwrap();

    store.add(&owner, item("B001", 2000)).await.unwrap();
    store.add(&owner, item("B002", 1500)).await.unwrap();
    store.add(&owner, item("B001", 1800)).await.unwrap();

    let items = store.list(&owner).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].product_id, pid("B001"));
    assert_eq!(items[0].current_price, Decimal::new(1800, 2));
    assert_eq!(items[1].product_id, pid("B002"));
}

#[tokio::test]
async fn owners_are_isolated() {
    let store = InMemoryWatchlist::new();
    let alice = OwnerId::new("alice").unwrap();
    let bob = OwnerId::new("bob").unwrap();

    store.add(&alice, item("B001", 2000)).await.unwrap();
    assert!(store.contains(&alice, &pid("B001")).await.unwrap());
    assert!(!store.contains(&bob, &pid("B001")).await.unwrap());
    assert!(store.list(&bob).await.unwrap().is_empty());
    assert_eq!(store.owners().await, 1);
}

#[tokio::test]
async fn remove_is_idempotent() {
    let store = InMemoryWatchlist::new();
    let owner = OwnerId::new("alice").unwrap();
    store.add(&owner, item("B001", 2000)).await.unwrap();

    store.remove(&owner, &pid("B001")).await.unwrap();
    store.remove(&owner, &pid("B001")).await.unwrap();
    store.remove(&OwnerId::new("nobody").unwrap(), &pid("B001")).await.unwrap();

    assert!(!store.contains(&owner, &pid("B001")).await.unwrap());
    assert_eq!(store.owners().await, 0);
}
