//! Plain-text rendering of the storefront screens.
//!
//! Every function here is pure: it takes the state a screen shows and returns the
//! text. The demo binary prints them; the tests pin the wording.

use crate::cart_actor::{total_item_count, OrderSummary};
use crate::model::{CartEntry, CatalogItem, OrderRecord, OrderStatus, WishlistEntry};
use std::fmt::Write;

pub const PREPARING_HINT: &str = "Your order is being prepared and will be delivered soon!";

pub fn price(amount: f64) -> String {
    format!("${amount:.2}")
}

/// One line per meal: wishlist marker, name, then category and area when known.
pub fn meal_card(item: &CatalogItem, in_wishlist: bool) -> String {
    let heart = if in_wishlist { "♥" } else { "♡" };
    let tags: Vec<&str> = [item.category.as_deref(), item.area.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if tags.is_empty() {
        format!("{heart} {}", item.name)
    } else {
        format!("{heart} {} [{}]", item.name, tags.join(" · "))
    }
}

/// Cart badge in the header. Hidden when the cart is empty.
pub fn header_badge(entries: &[CartEntry]) -> Option<String> {
    match total_item_count(entries) {
        0 => None,
        count => Some(count.to_string()),
    }
}

pub fn cart(entries: &[CartEntry]) -> String {
    if entries.is_empty() {
        return "Your Cart is Empty\nAdd some delicious meals to get started!".to_string();
    }

    let mut out = format!("Your Cart ({} items)\n", total_item_count(entries));
    for entry in entries {
        let _ = writeln!(
            out,
            "  {} x{} @ {} = {}",
            entry.item.name,
            entry.quantity,
            price(entry.price),
            price(entry.line_total())
        );
    }

    let summary = OrderSummary::for_entries(entries);
    let _ = writeln!(out, "Subtotal      {}", price(summary.subtotal));
    let _ = writeln!(out, "Delivery Fee  {}", price(summary.delivery_fee));
    let _ = writeln!(out, "Tax           {}", price(summary.tax));
    let _ = write!(out, "Total         {}", price(summary.total));
    out
}

pub fn wishlist(entries: &[WishlistEntry]) -> String {
    if entries.is_empty() {
        return "Your Wishlist is Empty".to_string();
    }
    entries
        .iter()
        .map(|entry| meal_card(&entry.item, true))
        .collect::<Vec<_>>()
        .join("\n")
}

fn status_label(status: &OrderStatus) -> String {
    match status {
        OrderStatus::Confirmed => "Confirmed".to_string(),
        OrderStatus::Delivered => "Delivered".to_string(),
        OrderStatus::Other(raw) if raw.is_empty() => "Processing".to_string(),
        OrderStatus::Other(raw) => raw.clone(),
    }
}

pub fn order_card(order: &OrderRecord) -> String {
    let placed = order
        .created_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Recent".to_string());

    let mut out = format!(
        "Order #{} ({}) {}\n",
        order.reference(),
        placed,
        status_label(&order.status)
    );
    for line in &order.items {
        let _ = writeln!(out, "  {} x{}  {}", line.item.name, line.quantity, price(line.line_total()));
    }
    if let Some(address) = &order.delivery_address {
        let _ = writeln!(out, "Delivery Address: {address}");
    }
    let _ = write!(out, "Total Amount: {}", price(order.total_amount));
    if order.status == OrderStatus::Confirmed {
        let _ = write!(out, "\n{PREPARING_HINT}");
    }
    out
}

pub fn orders(orders: &[OrderRecord]) -> String {
    if orders.is_empty() {
        return "No Orders Yet\nYou haven't placed any orders yet. Start shopping!".to_string();
    }
    orders.iter().map(order_card).collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeliveryAddress, OrderLine};

    #[test]
    fn test_meal_card() {
        let item = CatalogItem::new("1", "Teriyaki Chicken")
            .with_category("Chicken")
            .with_area("Japanese");
        assert_eq!(meal_card(&item, true), "♥ Teriyaki Chicken [Chicken · Japanese]");
        assert_eq!(meal_card(&CatalogItem::new("2", "Pie"), false), "♡ Pie");
    }

    #[test]
    fn test_header_badge_counts_units() {
        let mut soup = CartEntry::new(CatalogItem::new("1", "Soup"), 10.0);
        soup.quantity = 3;
        assert_eq!(header_badge(&[soup]), Some("3".to_string()));
        assert_eq!(header_badge(&[]), None);
    }

    #[test]
    fn test_cart_totals() {
        let mut soup = CartEntry::new(CatalogItem::new("1", "Soup"), 10.0);
        soup.quantity = 2;
        let text = cart(&[soup]);

        assert!(text.starts_with("Your Cart (2 items)"));
        assert!(text.contains("Soup x2 @ $10.00 = $20.00"));
        assert!(text.ends_with("Total         $24.59"));
    }

    #[test]
    fn test_confirmed_order_card() {
        let order = OrderRecord {
            id: "abcdefgh12345678".to_string(),
            user_id: "u1".to_string(),
            items: vec![OrderLine {
                item: CatalogItem::new("1", "Soup"),
                quantity: 2,
                price: 11.0,
            }],
            delivery_address: Some(DeliveryAddress {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
            }),
            status: OrderStatus::Confirmed,
            total_amount: 25.75,
            created_at: None,
        };

        let text = order_card(&order);

        assert!(text.starts_with("Order #12345678 (Recent) Confirmed"));
        assert!(text.contains("Soup x2  $22.00"));
        assert!(text.contains("Delivery Address: 1 Main St, Springfield, IL 62701"));
        assert!(text.contains("Total Amount: $25.75"));
        assert!(text.ends_with(PREPARING_HINT));
    }
}
