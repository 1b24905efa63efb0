//! # Meal Store demo
//!
//! Walks one customer through a session against the live meal catalog, with the
//! identity service and the document store running in-process.

use meal_store::catalog::HttpCatalog;
use meal_store::clients::ActorClient;
use meal_store::config::StoreConfig;
use meal_store::lifecycle::{setup_tracing, Backends, Storefront};
use meal_store::model::BrowseFilter;
use meal_store::session_actor::MemoryIdentityBackend;
use meal_store::store::MemoryDocumentStore;
use meal_store::views;
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StoreConfig::from_env().map_err(|e| e.to_string())?;
    let catalog = HttpCatalog::new(&config).map_err(|e| e.to_string())?;
    let storefront = Storefront::new(
        &config,
        Backends {
            identity: Arc::new(MemoryIdentityBackend::new()),
            store: Arc::new(MemoryDocumentStore::new()),
            catalog: Arc::new(catalog),
        },
    );

    // Print every notice the way a toast would show it
    let mut notices = storefront.notifier.subscribe();
    let toasts = tokio::spawn(async move {
        while let Ok(notice) = notices.recv().await {
            println!("[{:?}] {}: {}", notice.level, notice.title, notice.description);
        }
    });

    let featured = storefront.catalog.featured().await;
    println!("Featured meals:");
    for meal in &featured {
        println!("  {}", views::meal_card(meal, false));
    }

    // Signed out: the cart refuses the meal
    if let Some(meal) = featured.first() {
        storefront.cart_client.add_to_cart(meal.clone()).await.map_err(|e| e.to_string())?;
    }

    let span = tracing::info_span!("shopping");
    async {
        storefront
            .session_client
            .sign_up("sam@example.com", "secret123", "Sam")
            .await
            .map_err(|e| e.to_string())?;

        let seafood = storefront.catalog.browse(&BrowseFilter::category("Seafood")).await;
        for meal in seafood.iter().take(2) {
            storefront.cart_client.add_to_cart(meal.clone()).await.map_err(|e| e.to_string())?;
        }
        if let Some(meal) = seafood.first() {
            storefront.cart_client.add_to_cart(meal.clone()).await.map_err(|e| e.to_string())?;
            storefront.wishlist_client.toggle(meal.clone()).await.map_err(|e| e.to_string())?;
        }

        let cart = storefront.cart_client.items().await.map_err(|e| e.to_string())?;
        println!("\n{}", views::cart(&cart));
        if let Some(badge) = views::header_badge(&cart) {
            println!("Cart badge: {badge}");
        }

        let wishlist = storefront.wishlist_client.items().await.map_err(|e| e.to_string())?;
        println!("\n{}", views::wishlist(&wishlist));

        println!("\n{}", views::orders(&storefront.order_client.list_orders().await));

        storefront.session_client.sign_out().await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let after = storefront.cart_client.items().await.map_err(|e| e.to_string())?;
    info!(items = after.len(), "Signed out");

    storefront.shutdown().await?;
    toasts.abort();

    info!("Demo completed successfully");
    Ok(())
}
