//! # Document Store
//!
//! The remote persistence boundary. Each user owns one document per list kind
//! (`carts/<uid>`, `wishlists/<uid>`) and the checkout process writes one document per
//! order into `orders`.
//!
//! The [`DocumentStore`] trait mirrors what the storefront needs from a cloud
//! document database:
//!
//! - **set**: overwrite a whole document (no merge, last writer wins)
//! - **get**: one-off read
//! - **watch**: push subscription that yields every new version of a document,
//!   including the echo of our own writes
//! - **query**: equality filters plus a single ordering field
//!
//! [`MemoryDocumentStore`] implements the trait in-process for the demo binary and
//! the tests.

pub mod error;
pub mod memory;

pub use error::*;
pub use memory::*;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Display;
use tokio::sync::watch;

/// Location of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    pub collection: String,
    pub id: String,
}

impl DocumentPath {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        if self.collection.is_empty() || self.id.is_empty() {
            return Err(StoreError::InvalidPath(self.to_string()));
        }
        Ok(())
    }
}

impl Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// A stored document: its id inside the collection plus the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Push subscription to one document. `None` means the document does not exist.
pub type DocumentWatch = watch::Receiver<Option<Document>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Collection query: equality filters and an optional ordering field.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<(String, Direction)>,
}

impl Query {
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Overwrite the document at `path` with `data`.
    async fn set_document(&self, path: &DocumentPath, data: Value) -> Result<(), StoreError>;

    async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError>;

    /// Subscribe to every future version of the document. The current version is
    /// readable immediately through `borrow()`.
    async fn watch_document(&self, path: &DocumentPath) -> Result<DocumentWatch, StoreError>;

    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError>;
}
