//! Session provider: sign-up, sign-in and sign-out against a pluggable
//! [`IdentityBackend`], with the current identity pushed through a `watch` channel.

pub mod actor;
pub mod backend;
pub mod error;

pub use actor::{SessionActor, SessionRequest};
pub use backend::{IdentityBackend, MemoryIdentityBackend, MIN_PASSWORD_LEN};
pub use error::*;
