use crate::model::CatalogItem;
use serde::{Deserialize, Serialize};

/// A row of a user's wishlist. Same fields as the catalog item, no price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    #[serde(flatten)]
    pub item: CatalogItem,
}

impl From<CatalogItem> for WishlistEntry {
    fn from(item: CatalogItem) -> Self {
        Self { item }
    }
}
