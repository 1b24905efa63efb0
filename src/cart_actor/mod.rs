//! Cart-specific list logic: quantities, prices and totals.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::{total_item_count, total_price, Cart, OrderSummary, Pricer, DELIVERY_FEE, TAX_RATE};
pub use error::*;

use crate::clients::CartClient;
use crate::framework::ListActor;

/// Creates a new Cart actor and its client.
pub fn new(cart: Cart, buffer_size: usize) -> (ListActor<Cart>, CartClient) {
    let (actor, generic_client) = ListActor::new(cart, buffer_size);
    let client = CartClient::new(generic_client);

    (actor, client)
}
