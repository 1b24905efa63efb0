use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shape of a per-user list document in the remote store:
/// `{ "items": [...], "updatedAt": ... }`.
///
/// A document without `items` decodes as an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDocument<E> {
    #[serde(default = "Vec::new")]
    pub items: Vec<E>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl<E> ListDocument<E> {
    /// A document stamped with the current time.
    pub fn now(items: Vec<E>) -> Self {
        Self {
            items,
            updated_at: Some(Utc::now()),
        }
    }
}
