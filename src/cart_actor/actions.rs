//! Custom actions for the Cart list.
//!
//! These are the cart operations that don't fit the shared add/remove/clear intents.
//! They are handled by [`Cart::handle_action`](crate::framework::ListKind::handle_action).

/// Custom actions for the cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Sets the quantity of an entry.
    ///
    /// A quantity of zero or less removes the entry, exactly like `remove`.
    UpdateQuantity { item_id: String, quantity: i64 },
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartActionResult {
    /// The entry now has `quantity` units, or was removed when `quantity` is zero.
    UpdateQuantity { quantity: u32 },
}
