//! Type-safe wrappers around [`ListClient`](crate::framework::ListClient) and the
//! other actor channels.

pub mod actor_client;
pub mod cart_client;
pub mod order_client;
pub mod session_client;
pub mod wishlist_client;

pub use actor_client::ActorClient;
pub use cart_client::*;
pub use order_client::*;
pub use session_client::*;
pub use wishlist_client::*;
