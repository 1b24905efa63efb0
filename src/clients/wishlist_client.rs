use crate::clients::actor_client::{downcast_list_error, ActorClient};
use crate::framework::{AddOutcome, FrameworkError, ListClient, Outcome};
use crate::model::CatalogItem;
use crate::wishlist_actor::{Toggled, Wishlist, WishlistAction, WishlistActionResult, WishlistError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Wishlist actor.
#[derive(Clone)]
pub struct WishlistClient {
    inner: ListClient<Wishlist>,
}

impl WishlistClient {
    pub fn new(inner: ListClient<Wishlist>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Wishlist> for WishlistClient {
    type Error = WishlistError;

    fn inner(&self) -> &ListClient<Wishlist> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        downcast_list_error(e)
    }
}

impl WishlistClient {
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add_to_wishlist(&self, item: CatalogItem) -> Result<Outcome<AddOutcome>, WishlistError> {
        debug!("Sending request");
        self.inner.add(item).await.map_err(Self::map_error)
    }

    pub async fn remove_from_wishlist(&self, item_id: impl Into<String>) -> Result<Outcome<()>, WishlistError> {
        self.remove(item_id.into()).await
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn toggle(&self, item: CatalogItem) -> Result<Outcome<Toggled>, WishlistError> {
        debug!("Sending request");
        let outcome = self
            .inner
            .perform_action(WishlistAction::Toggle(item))
            .await
            .map_err(Self::map_error)?;
        Ok(outcome.map(|WishlistActionResult::Toggle(toggled)| toggled))
    }

    pub async fn is_in_wishlist(&self, item_id: &str) -> Result<bool, WishlistError> {
        let items = self.items().await?;
        Ok(items.iter().any(|entry| entry.item.id == item_id))
    }
}
