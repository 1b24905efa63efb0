//! # Framework Errors
//!
//! Errors raised by the list framework itself, as opposed to the rejections a list
//! reports through [`Outcome`](crate::framework::Outcome).

/// Errors that can occur within the list framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("List error: {0}")]
    ListError(Box<dyn std::error::Error + Send + Sync>),
}
