//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The entry to update is not in the cart.
    #[error("Item not in cart: {0}")]
    NotInCart(String),

    /// The requested quantity does not fit a cart entry.
    #[error("Quantity out of range: {0}")]
    QuantityOutOfRange(i64),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
