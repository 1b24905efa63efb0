//! # Generic Messages
//!
//! Message types exchanged between a [`ListClient`](crate::framework::ListClient) and
//! its [`ListActor`](crate::framework::ListActor), and the outcome types they carry.

use crate::framework::{AddOutcome, FrameworkError, ListKind};
use crate::model::CatalogItem;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Why a mutation was not applied. Rejections are reported to the user as a notice
/// and are not errors for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No identity is signed in.
    Unauthenticated,
    /// The item is already in a list that holds each item at most once.
    AlreadyPresent,
}

/// Result of a mutation intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Applied(value) => Outcome::Applied(f(value)),
            Outcome::Rejected(reason) => Outcome::Rejected(reason),
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Rejected(reason) => Some(*reason),
        }
    }
}

/// Lifecycle state of a list actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// No identity; the list is empty and mutations are rejected.
    Detached,
    /// Following the remote document of `uid`.
    Attached { uid: String },
}

/// Internal message type sent to a list actor.
///
/// # The Intent Pattern
/// Every variant is one user intent on the list (`Add`, `Remove`, `Clear`, a
/// kind-specific `Action`) or a read of the current state (`Items`, `Status`). The enum
/// is generic over `K: ListKind`, so a cart action can't be sent to a wishlist actor.
#[derive(Debug)]
pub enum ListRequest<K: ListKind> {
    Add {
        item: CatalogItem,
        respond_to: Response<Outcome<AddOutcome>>,
    },
    Remove {
        item_id: String,
        respond_to: Response<Outcome<()>>,
    },
    Clear {
        respond_to: Response<Outcome<()>>,
    },
    Action {
        action: K::Action,
        respond_to: Response<Outcome<K::ActionResult>>,
    },
    Items {
        respond_to: Response<Vec<K::Entry>>,
    },
    Status {
        respond_to: Response<Attachment>,
    },
}
