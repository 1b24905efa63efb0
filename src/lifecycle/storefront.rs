use crate::cart_actor::Cart;
use crate::catalog::{CatalogClient, CatalogSource};
use crate::clients::{CartClient, OrderClient, SessionClient, WishlistClient};
use crate::config::StoreConfig;
use crate::framework::ListContext;
use crate::notice::Notifier;
use crate::session_actor::{IdentityBackend, SessionActor};
use crate::store::DocumentStore;
use std::sync::Arc;
use tracing::{error, info};

/// The external services a storefront talks to.
#[derive(Clone)]
pub struct Backends {
    pub identity: Arc<dyn IdentityBackend>,
    pub store: Arc<dyn DocumentStore>,
    pub catalog: Arc<dyn CatalogSource>,
}

/// The composition root of the storefront.
///
/// `Storefront` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the session, cart and wishlist actors
/// - **Dependency Wiring**: Handing every list actor the identity feed, the document store
///   and the notice channel when it starts running
///
/// # Example
///
/// ```ignore
/// let storefront = Storefront::new(&config, backends);
///
/// storefront.session_client.sign_in("sam@example.com", "secret1").await?;
/// storefront.cart_client.add_to_cart(meal).await?;
///
/// // Gracefully shut down when done
/// storefront.shutdown().await?;
/// ```
pub struct Storefront {
    pub session_client: SessionClient,
    pub cart_client: CartClient,
    pub wishlist_client: WishlistClient,
    pub order_client: OrderClient,
    pub catalog: CatalogClient,
    /// Subscribe here to receive user-facing notices.
    pub notifier: Notifier,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Spawns every actor with the default random-price cart. Must be called inside a
    /// Tokio runtime.
    pub fn new(config: &StoreConfig, backends: Backends) -> Self {
        Self::with_cart(config, backends, Cart::new())
    }

    pub fn with_cart(config: &StoreConfig, backends: Backends, cart: Cart) -> Self {
        let notifier = Notifier::default();
        let capacity = config.channel_capacity;

        // 1. Create actors (no dependencies yet)
        let (session_actor, session_client) = SessionActor::new(backends.identity.clone(), capacity);
        let (cart_actor, cart_client) = crate::cart_actor::new(cart, capacity);
        let (wishlist_actor, wishlist_client) = crate::wishlist_actor::new(capacity);

        // 2. Start actors with injected context
        let context = ListContext {
            store: backends.store.clone(),
            identity: session_client.subscribe(),
            notifier: notifier.clone(),
        };
        let session_handle = tokio::spawn(session_actor.run(notifier.clone()));
        let cart_handle = tokio::spawn(cart_actor.run(context.clone()));
        let wishlist_handle = tokio::spawn(wishlist_actor.run(context));

        let order_client = OrderClient::new(backends.store, session_client.subscribe(), notifier.clone());
        let catalog = CatalogClient::new(backends.catalog, config);

        info!(capacity, "Storefront started");
        Self {
            session_client,
            cart_client,
            wishlist_client,
            order_client,
            catalog,
            notifier,
            handles: vec![session_handle, cart_handle, wishlist_handle],
        }
    }

    /// Gracefully shuts down every actor.
    ///
    /// Dropping the clients closes the request channels; each actor drains its queue
    /// and exits. Clones of the clients held elsewhere keep their actor alive, so drop
    /// them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        drop(self.session_client);
        drop(self.cart_client);
        drop(self.wishlist_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
