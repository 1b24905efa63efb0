use async_trait::async_trait;
use meal_store::cart_actor::{Cart, CartError};
use meal_store::catalog::{CatalogError, CatalogSource, Endpoint};
use meal_store::clients::actor_client::ActorClient;
use meal_store::config::StoreConfig;
use meal_store::framework::{AddOutcome, Attachment, Outcome, Rejection};
use meal_store::lifecycle::{Backends, Storefront};
use meal_store::model::CatalogItem;
use meal_store::notice::{Notice, NoticeLevel};
use meal_store::session_actor::MemoryIdentityBackend;
use meal_store::store::{DocumentPath, DocumentStore, MemoryDocumentStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Catalog that knows no meals; these tests never browse.
struct EmptyCatalog;

#[async_trait]
impl CatalogSource for EmptyCatalog {
    async fn fetch(&self, _endpoint: &Endpoint) -> Result<Value, CatalogError> {
        Ok(json!({ "meals": null }))
    }
}

struct Harness {
    storefront: Storefront,
    store: Arc<MemoryDocumentStore>,
    notices: broadcast::Receiver<Notice>,
}

fn start() -> Harness {
    let store = Arc::new(MemoryDocumentStore::new());
    let storefront = Storefront::with_cart(
        &StoreConfig::default(),
        Backends {
            identity: Arc::new(MemoryIdentityBackend::new()),
            store: store.clone(),
            catalog: Arc::new(EmptyCatalog),
        },
        Cart::with_pricer(|_| 12.0),
    );
    let notices = storefront.notifier.subscribe();
    Harness {
        storefront,
        store,
        notices,
    }
}

fn teriyaki() -> CatalogItem {
    CatalogItem::new("52772", "Teriyaki Chicken Casserole")
        .with_thumbnail("https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg")
        .with_category("Chicken")
        .with_area("Japanese")
}

fn pie() -> CatalogItem {
    CatalogItem::new("52768", "Apple Frangipan Tart").with_category("Dessert")
}

/// Skips notices until one with `title` arrives.
async fn wait_for(notices: &mut broadcast::Receiver<Notice>, title: &str) -> Notice {
    loop {
        let notice = notices.recv().await.expect("notice channel closed");
        if notice.title == title {
            return notice;
        }
    }
}

#[tokio::test]
async fn test_signed_out_mutations_are_rejected_without_writes() {
    let mut h = start();
    let cart = &h.storefront.cart_client;
    let wishlist = &h.storefront.wishlist_client;

    let added = cart.add_to_cart(teriyaki()).await.unwrap();
    assert_eq!(added, Outcome::Rejected(Rejection::Unauthenticated));
    let notice = wait_for(&mut h.notices, "Please log in").await;
    assert_eq!(notice.description, "You need to be logged in to add items to cart.");
    assert_eq!(notice.level, NoticeLevel::Destructive);

    assert!(cart.update_quantity("52772", 3).await.unwrap().rejection().is_some());
    let notice = wait_for(&mut h.notices, "Please log in").await;
    assert_eq!(notice.description, "You need to be logged in to change your cart.");
    assert!(cart.remove_from_cart("52772").await.unwrap().rejection().is_some());
    let notice = wait_for(&mut h.notices, "Please log in").await;
    assert_eq!(notice.description, "You need to be logged in to remove items from your cart.");
    assert!(cart.clear_cart().await.unwrap().rejection().is_some());
    let notice = wait_for(&mut h.notices, "Please log in").await;
    assert_eq!(notice.description, "You need to be logged in to clear your cart.");
    assert!(wishlist.add_to_wishlist(pie()).await.unwrap().rejection().is_some());

    assert!(cart.items().await.unwrap().is_empty());
    assert!(wishlist.items().await.unwrap().is_empty());
    assert_eq!(cart.status().await.unwrap(), Attachment::Detached);
    assert_eq!(h.store.write_count(), 0);
}

#[tokio::test]
async fn test_cart_add_twice_yields_quantity_two() {
    let mut h = start();
    let sf = &h.storefront;
    let identity = sf.session_client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();

    assert_eq!(sf.cart_client.add_to_cart(teriyaki()).await.unwrap(), Outcome::Applied(AddOutcome::Added));
    assert_eq!(
        sf.cart_client.add_to_cart(teriyaki()).await.unwrap(),
        Outcome::Applied(AddOutcome::Incremented { quantity: 2 })
    );

    let items = sf.cart_client.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(sf.cart_client.total_items().await.unwrap(), 2);
    assert_eq!(sf.cart_client.total_price().await.unwrap(), 24.0);

    let notice = wait_for(&mut h.notices, "Added to cart!").await;
    assert_eq!(notice.description, "Teriyaki Chicken Casserole has been added to your cart.");

    // The remote document holds the whole list with the catalog field names
    let stored = h
        .store
        .get_document(&DocumentPath::new("carts", identity.uid))
        .await
        .unwrap()
        .expect("cart document");
    assert_eq!(stored.data["items"][0]["idMeal"], "52772");
    assert_eq!(stored.data["items"][0]["quantity"], 2);
    assert!(stored.data["updatedAt"].is_string());
}

#[tokio::test]
async fn test_update_quantity_zero_is_remove() {
    let h = start();
    let sf = &h.storefront;
    sf.session_client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();
    sf.cart_client.add_to_cart(teriyaki()).await.unwrap();
    sf.cart_client.add_to_cart(pie()).await.unwrap();

    assert_eq!(sf.cart_client.update_quantity("52768", 4).await.unwrap(), Outcome::Applied(4));
    assert_eq!(sf.cart_client.total_price().await.unwrap(), 60.0);

    assert_eq!(sf.cart_client.update_quantity("52772", 0).await.unwrap(), Outcome::Applied(0));
    let items = sf.cart_client.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.id, "52768");

    // Removing an absent id is not an error
    assert!(sf.cart_client.remove_from_cart("52772").await.unwrap().is_applied());
}

#[tokio::test]
async fn test_wishlist_duplicate_is_rejected_with_notice() {
    let mut h = start();
    let sf = &h.storefront;
    sf.session_client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();

    assert!(sf.wishlist_client.add_to_wishlist(pie()).await.unwrap().is_applied());
    let writes = h.store.write_count();

    let again = sf.wishlist_client.add_to_wishlist(pie()).await.unwrap();

    assert_eq!(again, Outcome::Rejected(Rejection::AlreadyPresent));
    assert_eq!(sf.wishlist_client.items().await.unwrap().len(), 1);
    assert_eq!(h.store.write_count(), writes);
    let notice = wait_for(&mut h.notices, "Already in wishlist").await;
    assert_eq!(notice.description, "This item is already in your wishlist.");
    assert!(sf.wishlist_client.is_in_wishlist("52768").await.unwrap());
}

#[tokio::test]
async fn test_sign_out_clears_and_detaches() {
    let h = start();
    let sf = &h.storefront;
    let identity = sf.session_client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();
    sf.cart_client.add_to_cart(teriyaki()).await.unwrap();
    assert_eq!(
        sf.cart_client.status().await.unwrap(),
        Attachment::Attached { uid: identity.uid.clone() }
    );

    sf.session_client.sign_out().await.unwrap();

    assert!(sf.cart_client.items().await.unwrap().is_empty());
    assert_eq!(sf.cart_client.status().await.unwrap(), Attachment::Detached);

    // Later writes to the old document are no longer observed
    h.store
        .set_document(
            &DocumentPath::new("carts", identity.uid),
            json!({ "items": [{ "idMeal": "1", "strMeal": "Soup", "quantity": 1, "price": 10.0 }] }),
        )
        .await
        .unwrap();
    assert!(sf.cart_client.items().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_quantity_at_max_keeps_cart_alive() {
    let h = start();
    let sf = &h.storefront;
    sf.session_client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();
    sf.cart_client.add_to_cart(teriyaki()).await.unwrap();
    let max = i64::from(u32::MAX);
    assert_eq!(
        sf.cart_client.update_quantity("52772", max).await.unwrap(),
        Outcome::Applied(u32::MAX)
    );
    let writes = h.store.write_count();

    let err = sf.cart_client.add_to_cart(teriyaki()).await.unwrap_err();

    assert_eq!(err, CartError::QuantityOutOfRange(max + 1));
    assert_eq!(h.store.write_count(), writes);
    let items = sf.cart_client.items().await.unwrap();
    assert_eq!(items[0].quantity, u32::MAX);

    sf.cart_client.add_to_cart(pie()).await.unwrap();
    sf.cart_client.update_quantity("52768", max).await.unwrap();
    assert_eq!(sf.cart_client.total_items().await.unwrap(), 2 * u64::from(u32::MAX));
}

#[tokio::test]
async fn test_identity_switch_moves_to_new_users_list() {
    let h = start();
    let sf = &h.storefront;
    let bo = sf.session_client.sign_up("bo@example.com", "secret2", "Bo").await.unwrap();
    sf.cart_client.add_to_cart(pie()).await.unwrap();
    let sam = sf.session_client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();
    assert!(sf.cart_client.items().await.unwrap().is_empty());
    sf.cart_client.add_to_cart(teriyaki()).await.unwrap();

    // Straight from Sam to Bo, no sign-out in between
    sf.session_client.sign_in("bo@example.com", "secret2").await.unwrap();

    assert_eq!(
        sf.cart_client.status().await.unwrap(),
        Attachment::Attached { uid: bo.uid.clone() }
    );
    let items = sf.cart_client.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.id, "52768");

    h.store
        .set_document(
            &DocumentPath::new("carts", sam.uid),
            json!({ "items": [{ "idMeal": "1", "strMeal": "Soup", "quantity": 5, "price": 10.0 }] }),
        )
        .await
        .unwrap();
    let items = sf.cart_client.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.id, "52768");
}

#[tokio::test]
async fn test_sign_in_restores_saved_list() {
    let h = start();
    let sf = &h.storefront;
    sf.session_client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();
    sf.wishlist_client.add_to_wishlist(pie()).await.unwrap();
    sf.session_client.sign_out().await.unwrap();
    assert!(sf.wishlist_client.items().await.unwrap().is_empty());

    sf.session_client.sign_in("sam@example.com", "secret1").await.unwrap();

    let items = sf.wishlist_client.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.name, "Apple Frangipan Tart");
}

#[tokio::test]
async fn test_write_from_another_session_replaces_list() {
    let h = start();
    let sf = &h.storefront;
    let identity = sf.session_client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();
    sf.cart_client.add_to_cart(teriyaki()).await.unwrap();

    h.store
        .set_document(
            &DocumentPath::new("carts", identity.uid),
            json!({
                "items": [{ "idMeal": "52768", "strMeal": "Apple Frangipan Tart", "quantity": 3, "price": 20.0 }],
                "updatedAt": "2026-01-01T00:00:00Z"
            }),
        )
        .await
        .unwrap();

    let items = sf.cart_client.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.id, "52768");
    assert_eq!(sf.cart_client.total_price().await.unwrap(), 60.0);
}

#[tokio::test]
async fn test_save_failure_keeps_local_list_and_notifies() {
    let mut h = start();
    let sf = &h.storefront;
    sf.session_client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();
    h.store.set_offline(true);

    let added = sf.cart_client.add_to_cart(teriyaki()).await.unwrap();

    assert!(added.is_applied());
    assert_eq!(sf.cart_client.items().await.unwrap().len(), 1);
    let notice = wait_for(&mut h.notices, "Couldn't save your cart").await;
    assert_eq!(notice.level, NoticeLevel::Destructive);
}

#[tokio::test]
async fn test_shutdown_completes() {
    let h = start();
    h.storefront.shutdown().await.expect("clean shutdown");
}
