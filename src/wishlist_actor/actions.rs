//! Custom actions for the Wishlist list.

use crate::model::CatalogItem;

/// Custom actions for the wishlist.
#[derive(Debug, Clone)]
pub enum WishlistAction {
    /// Removes the item if present, adds it otherwise (the heart button on a meal card).
    Toggle(CatalogItem),
}

/// Results from WishlistActions - variants match 1:1 with WishlistAction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistActionResult {
    Toggle(Toggled),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}
