//! `ListKind` implementation for the cart.
//!
//! Adding an item already in the cart bumps its quantity. New entries get a price
//! from the cart's pricer; the default pricer picks a whole-dollar amount in
//! `[10, 30)` because the catalog carries no prices.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::framework::{AddOutcome, ListKind, Outcome};
use crate::model::{CartEntry, CatalogItem};
use crate::notice::{Notice, Notifier};
use rand::Rng;

/// Assigns a price to an item entering the cart.
pub type Pricer = Box<dyn Fn(&CatalogItem) -> f64 + Send + Sync>;

pub struct Cart {
    pricer: Pricer,
}

impl Cart {
    pub fn new() -> Self {
        Self::with_pricer(|_| f64::from(rand::thread_rng().gen_range(10u32..30)))
    }

    pub fn with_pricer(pricer: impl Fn(&CatalogItem) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            pricer: Box::new(pricer),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl ListKind for Cart {
    type Entry = CartEntry;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Error = CartError;

    const COLLECTION: &'static str = "carts";
    const LABEL: &'static str = "cart";

    fn entry_id(entry: &CartEntry) -> &str {
        &entry.item.id
    }

    fn on_add(
        &self,
        entries: &mut Vec<CartEntry>,
        item: CatalogItem,
        notifier: &Notifier,
    ) -> Result<Outcome<AddOutcome>, CartError> {
        let notice = Notice::info(
            "Added to cart!",
            format!("{} has been added to your cart.", item.name),
        );
        let outcome = match entries.iter_mut().find(|entry| entry.item.id == item.id) {
            Some(entry) => {
                entry.quantity = entry
                    .quantity
                    .checked_add(1)
                    .ok_or(CartError::QuantityOutOfRange(i64::from(entry.quantity) + 1))?;
                AddOutcome::Incremented {
                    quantity: entry.quantity,
                }
            }
            None => {
                let price = (self.pricer)(&item);
                entries.push(CartEntry::new(item, price));
                AddOutcome::Added
            }
        };
        notifier.notify(notice);
        Ok(Outcome::Applied(outcome))
    }

    fn handle_action(
        &self,
        entries: &mut Vec<CartEntry>,
        action: CartAction,
        notifier: &Notifier,
    ) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::UpdateQuantity { item_id, quantity } if quantity <= 0 => {
                self.on_remove(entries, &item_id, notifier)?;
                Ok(CartActionResult::UpdateQuantity { quantity: 0 })
            }
            CartAction::UpdateQuantity { item_id, quantity } => {
                let quantity =
                    u32::try_from(quantity).map_err(|_| CartError::QuantityOutOfRange(quantity))?;
                let entry = entries
                    .iter_mut()
                    .find(|entry| entry.item.id == item_id)
                    .ok_or(CartError::NotInCart(item_id))?;
                entry.quantity = quantity;
                Ok(CartActionResult::UpdateQuantity { quantity })
            }
        }
    }
}

/// Sum of `price × quantity` over the entries.
pub fn total_price(entries: &[CartEntry]) -> f64 {
    entries.iter().map(CartEntry::line_total).sum()
}

/// Sum of quantities; the header badge number.
pub fn total_item_count(entries: &[CartEntry]) -> u64 {
    entries.iter().map(|entry| u64::from(entry.quantity)).sum()
}

pub const DELIVERY_FEE: f64 = 2.99;
pub const TAX_RATE: f64 = 0.08;

/// Checkout summary shown next to the cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderSummary {
    /// Flat delivery fee plus tax on the subtotal. The fee applies even to an empty cart.
    pub fn for_entries(entries: &[CartEntry]) -> Self {
        let subtotal = total_price(entries);
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            delivery_fee: DELIVERY_FEE,
            tax,
            total: subtotal + DELIVERY_FEE + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_cart() -> Cart {
        Cart::with_pricer(|_| 12.0)
    }

    #[test]
    fn test_add_twice_increments_quantity() {
        let cart = fixed_cart();
        let notifier = Notifier::default();
        let mut entries = Vec::new();

        let first = cart.on_add(&mut entries, CatalogItem::new("1", "Soup"), &notifier).unwrap();
        let second = cart.on_add(&mut entries, CatalogItem::new("1", "Soup"), &notifier).unwrap();

        assert_eq!(first, Outcome::Applied(AddOutcome::Added));
        assert_eq!(second, Outcome::Applied(AddOutcome::Incremented { quantity: 2 }));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 2);
        assert_eq!(entries[0].price, 12.0);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let cart = fixed_cart();
        let notifier = Notifier::default();
        let mut entries = vec![CartEntry::new(CatalogItem::new("1", "Soup"), 10.0)];

        let result = cart
            .handle_action(
                &mut entries,
                CartAction::UpdateQuantity { item_id: "1".to_string(), quantity: -3 },
                &notifier,
            )
            .unwrap();

        assert_eq!(result, CartActionResult::UpdateQuantity { quantity: 0 });
        assert!(entries.is_empty());
    }

    #[test]
    fn test_update_unknown_item_fails() {
        let cart = fixed_cart();
        let mut entries = Vec::new();

        let result = cart.handle_action(
            &mut entries,
            CartAction::UpdateQuantity { item_id: "9".to_string(), quantity: 2 },
            &Notifier::default(),
        );

        assert_eq!(result, Err(CartError::NotInCart("9".to_string())));
    }

    #[test]
    fn test_add_at_max_quantity_fails_unchanged() {
        let cart = fixed_cart();
        let mut soup = CartEntry::new(CatalogItem::new("1", "Soup"), 10.0);
        soup.quantity = u32::MAX;
        let mut entries = vec![soup];

        let result = cart.on_add(&mut entries, CatalogItem::new("1", "Soup"), &Notifier::default());

        assert_eq!(result, Err(CartError::QuantityOutOfRange(i64::from(u32::MAX) + 1)));
        assert_eq!(entries[0].quantity, u32::MAX);
    }

    #[test]
    fn test_item_count_does_not_wrap() {
        let mut soup = CartEntry::new(CatalogItem::new("1", "Soup"), 10.0);
        soup.quantity = u32::MAX;
        let mut pie = CartEntry::new(CatalogItem::new("2", "Pie"), 25.0);
        pie.quantity = u32::MAX;

        assert_eq!(total_item_count(&[soup, pie]), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_totals() {
        let mut soup = CartEntry::new(CatalogItem::new("1", "Soup"), 10.0);
        soup.quantity = 2;
        let pie = CartEntry::new(CatalogItem::new("2", "Pie"), 25.0);

        assert_eq!(total_price(&[soup.clone(), pie.clone()]), 45.0);
        assert_eq!(total_item_count(&[soup, pie]), 3);
        assert_eq!(total_price(&[]), 0.0);
    }

    #[test]
    fn test_order_summary() {
        let mut soup = CartEntry::new(CatalogItem::new("1", "Soup"), 10.0);
        soup.quantity = 5;

        let summary = OrderSummary::for_entries(&[soup]);

        assert_eq!(summary.subtotal, 50.0);
        assert!((summary.tax - 4.0).abs() < 1e-9);
        assert!((summary.total - 56.99).abs() < 1e-9);
    }

    #[test]
    fn test_default_price_range() {
        let cart = Cart::new();
        for _ in 0..50 {
            let price = (cart.pricer)(&CatalogItem::new("1", "Soup"));
            assert!((10.0..30.0).contains(&price));
            assert_eq!(price.fract(), 0.0);
        }
    }
}
