//! Generic actor framework for per-user lists.
//!
//! This module provides the building blocks shared by the cart and the wishlist: a
//! list actor that follows the signed-in identity, mirrors one remote document and
//! writes the whole list back after every accepted intent.
//!
//! # Main Components
//!
//! - [`ListKind`] - Trait that list kinds implement to be managed by a list actor
//! - [`ListActor`] - Generic actor that owns one list and its remote subscription
//! - [`ListClient`] - Type-safe client for sending intents to a list actor
//! - [`Outcome`] / [`Rejection`] - Applied or rejected intents
//! - [`FrameworkError`] - Actor plumbing errors
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod error;
pub mod kind;
pub mod message;
pub mod mock;

pub use actor::{ListActor, ListContext};
pub use client::ListClient;
pub use error::FrameworkError;
pub use kind::{AddOutcome, ListKind};
pub use message::{Attachment, ListRequest, Outcome, Rejection, Response};
