//! Error types for the Wishlist actor.

use thiserror::Error;

/// Errors that can occur during wishlist operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WishlistError {
    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for WishlistError {
    fn from(msg: String) -> Self {
        WishlistError::ActorCommunicationError(msg)
    }
}
