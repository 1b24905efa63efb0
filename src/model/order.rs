use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::model::CatalogItem;

/// A past order, as stored by the checkout process.
///
/// Orders are read-only here: this crate only lists them through
/// [`OrderClient`](crate::clients::OrderClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(rename = "deliveryAddress", default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<DeliveryAddress>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(rename = "totalAmount", default)]
    pub total_amount: f64,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderRecord {
    /// Short human reference: the last eight characters of the id, upper-cased.
    pub fn reference(&self) -> String {
        let chars: Vec<char> = self.id.chars().collect();
        let start = chars.len().saturating_sub(8);
        chars[start..].iter().collect::<String>().to_uppercase()
    }
}

/// Snapshot of a cart row at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub quantity: u32,
    pub price: f64,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "zipCode", default)]
    pub zip_code: String,
}

impl Display for DeliveryAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.city, self.state, self.zip_code)
    }
}

/// Order status. Anything the checkout writes besides `confirmed` and `delivered`
/// is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Confirmed,
    Delivered,
    Other(String),
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Other(String::new())
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "confirmed" => OrderStatus::Confirmed,
            "delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.to_string()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}
