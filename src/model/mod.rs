//! Pure data structures shared by the actors, the clients and the views.

pub mod cart;
pub mod catalog;
pub mod identity;
pub mod list;
pub mod order;
pub mod wishlist;

pub use cart::*;
pub use catalog::*;
pub use identity::*;
pub use list::*;
pub use order::*;
pub use wishlist::*;
