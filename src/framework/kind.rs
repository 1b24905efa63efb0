//! # ListKind Trait
//!
//! The `ListKind` trait is the contract a per-user list (cart, wishlist, ...) implements
//! to be managed by the generic [`ListActor`](crate::framework::ListActor). The actor
//! owns the plumbing: identity tracking, the remote subscription, write-back and
//! rejection of unauthenticated mutations. The kind only decides how its entries react
//! to an intent.
//!
//! # Provided Methods (Hooks)
//! - [`ListKind::on_remove`] filters the entry out and posts a "Removed from ..."
//!   notice. Override it only if removal needs more than that.

use crate::framework::Outcome;
use crate::model::CatalogItem;
use crate::notice::{Notice, Notifier};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Result of an accepted `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was appended.
    Added,
    /// The item was already present; its quantity is now `quantity`.
    Incremented { quantity: u32 },
}

/// Trait that any per-user list must implement to be managed by `ListActor`.
///
/// # Hooks and Write-back
/// Hooks receive the current entries mutably and apply the intent in place. Whenever a
/// hook returns `Ok(Outcome::Applied(..))` (or `Ok(..)` for actions and removals) the
/// actor writes the *whole* list back to `<COLLECTION>/<uid>`; a rejected outcome
/// leaves both the local and the remote list untouched.
///
/// Hooks are only ever called while the list is attached to an identity.
pub trait ListKind: Send + Sync + 'static {
    /// One row of the list, as stored in the remote document.
    type Entry: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Enum representing list-specific operations (e.g., `UpdateQuantity`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The error type for this list.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Remote collection holding one document per user.
    const COLLECTION: &'static str;

    /// Name used in logs and notices ("cart", "wishlist").
    const LABEL: &'static str;

    fn entry_id(entry: &Self::Entry) -> &str;

    /// Called for `add(item)`.
    fn on_add(
        &self,
        entries: &mut Vec<Self::Entry>,
        item: CatalogItem,
        notifier: &Notifier,
    ) -> Result<Outcome<AddOutcome>, Self::Error>;

    /// Called for `remove(item_id)`. Removing an absent id is not an error.
    fn on_remove(
        &self,
        entries: &mut Vec<Self::Entry>,
        item_id: &str,
        notifier: &Notifier,
    ) -> Result<(), Self::Error> {
        entries.retain(|entry| Self::entry_id(entry) != item_id);
        notifier.notify(Notice::info(
            format!("Removed from {}", Self::LABEL),
            format!("Item has been removed from your {}.", Self::LABEL),
        ));
        Ok(())
    }

    /// Handle a custom list-specific action.
    fn handle_action(
        &self,
        entries: &mut Vec<Self::Entry>,
        action: Self::Action,
        notifier: &Notifier,
    ) -> Result<Self::ActionResult, Self::Error>;
}
