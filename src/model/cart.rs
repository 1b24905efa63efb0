use crate::model::CatalogItem;
use serde::{Deserialize, Serialize};

/// A row of a user's cart.
///
/// # List Framework
/// Managed by the generic [`ListActor`](crate::framework::ListActor) through the
/// [`Cart`](crate::cart_actor::Cart) list kind. The catalog fields are flattened so
/// the stored document keeps the catalog's field names next to `quantity` and `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub quantity: u32,
    pub price: f64,
}

impl CartEntry {
    /// Creates a new CartEntry with quantity 1.
    pub fn new(item: CatalogItem, price: f64) -> Self {
        Self {
            item,
            quantity: 1,
            price,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
