//! Wishlist-specific list logic.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::Wishlist;
pub use error::*;

use crate::clients::WishlistClient;
use crate::framework::ListActor;

/// Creates a new Wishlist actor and its client.
pub fn new(buffer_size: usize) -> (ListActor<Wishlist>, WishlistClient) {
    let (actor, generic_client) = ListActor::new(Wishlist, buffer_size);
    let client = WishlistClient::new(generic_client);

    (actor, client)
}
