use crate::cart_actor::{
    total_item_count, total_price, Cart, CartAction, CartActionResult, CartError, OrderSummary,
};
use crate::clients::actor_client::{downcast_list_error, ActorClient};
use crate::framework::{AddOutcome, FrameworkError, ListClient, Outcome};
use crate::model::CatalogItem;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ListClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ListClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ListClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        downcast_list_error(e)
    }
}

impl CartClient {
    /// Adds one unit of `item`. Rejected with a notice when signed out.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add_to_cart(&self, item: CatalogItem) -> Result<Outcome<AddOutcome>, CartError> {
        debug!("Sending request");
        self.inner.add(item).await.map_err(Self::map_error)
    }

    pub async fn remove_from_cart(&self, item_id: impl Into<String>) -> Result<Outcome<()>, CartError> {
        self.remove(item_id.into()).await
    }

    /// Sets the quantity of an entry; zero or less removes it.
    /// Returns the new quantity (0 after a removal).
    #[instrument(skip(self, item_id))]
    pub async fn update_quantity(
        &self,
        item_id: impl Into<String>,
        quantity: i64,
    ) -> Result<Outcome<u32>, CartError> {
        debug!("Sending request");
        let action = CartAction::UpdateQuantity {
            item_id: item_id.into(),
            quantity,
        };
        let outcome = self
            .inner
            .perform_action(action)
            .await
            .map_err(Self::map_error)?;
        Ok(outcome.map(|CartActionResult::UpdateQuantity { quantity }| quantity))
    }

    pub async fn clear_cart(&self) -> Result<Outcome<()>, CartError> {
        self.clear().await
    }

    /// Σ price × quantity over the current entries.
    pub async fn total_price(&self) -> Result<f64, CartError> {
        Ok(total_price(&self.items().await?))
    }

    /// Σ quantity over the current entries.
    pub async fn total_items(&self) -> Result<u64, CartError> {
        Ok(total_item_count(&self.items().await?))
    }

    pub async fn summary(&self) -> Result<OrderSummary, CartError> {
        Ok(OrderSummary::for_entries(&self.items().await?))
    }
}
