//! `ListKind` implementation for the wishlist.
//!
//! A wishlist holds each item at most once. Adding an item that is already there is
//! rejected with [`Rejection::AlreadyPresent`] and nothing is written.

use super::actions::{Toggled, WishlistAction, WishlistActionResult};
use super::error::WishlistError;
use crate::framework::{AddOutcome, ListKind, Outcome, Rejection};
use crate::model::{CatalogItem, WishlistEntry};
use crate::notice::{Notice, Notifier};

#[derive(Debug, Clone, Copy, Default)]
pub struct Wishlist;

impl Wishlist {
    fn insert(entries: &mut Vec<WishlistEntry>, item: CatalogItem, notifier: &Notifier) {
        notifier.notify(Notice::info(
            "Added to wishlist!",
            format!("{} has been added to your wishlist.", item.name),
        ));
        entries.push(WishlistEntry::from(item));
    }
}

impl ListKind for Wishlist {
    type Entry = WishlistEntry;
    type Action = WishlistAction;
    type ActionResult = WishlistActionResult;
    type Error = WishlistError;

    const COLLECTION: &'static str = "wishlists";
    const LABEL: &'static str = "wishlist";

    fn entry_id(entry: &WishlistEntry) -> &str {
        &entry.item.id
    }

    fn on_add(
        &self,
        entries: &mut Vec<WishlistEntry>,
        item: CatalogItem,
        notifier: &Notifier,
    ) -> Result<Outcome<AddOutcome>, WishlistError> {
        if entries.iter().any(|entry| entry.item.id == item.id) {
            notifier.notify(Notice::info(
                "Already in wishlist",
                "This item is already in your wishlist.",
            ));
            return Ok(Outcome::Rejected(Rejection::AlreadyPresent));
        }
        Self::insert(entries, item, notifier);
        Ok(Outcome::Applied(AddOutcome::Added))
    }

    fn handle_action(
        &self,
        entries: &mut Vec<WishlistEntry>,
        action: WishlistAction,
        notifier: &Notifier,
    ) -> Result<WishlistActionResult, WishlistError> {
        match action {
            WishlistAction::Toggle(item) => {
                if entries.iter().any(|entry| entry.item.id == item.id) {
                    self.on_remove(entries, &item.id, notifier)?;
                    Ok(WishlistActionResult::Toggle(Toggled::Removed))
                } else {
                    Self::insert(entries, item, notifier);
                    Ok(WishlistActionResult::Toggle(Toggled::Added))
                }
            }
        }
    }
}
