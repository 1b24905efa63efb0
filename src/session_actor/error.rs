//! Error types for the Session actor.

use thiserror::Error;

/// Errors that can occur during sign-up, sign-in and sign-out.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password should be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Email already in use: {0}")]
    EmailInUse(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The identity service could not be reached.
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for SessionError {
    fn from(msg: String) -> Self {
        SessionError::ActorCommunicationError(msg)
    }
}
