//! # Meal Catalog
//!
//! Read-only lookups against a TheMealDB-style HTTP+JSON service. Every endpoint
//! answers `{ "meals": [...] }`, with `meals` set to `null` when nothing matches.
//!
//! [`CatalogSource`] is the transport seam ([`HttpCatalog`] in production, scripted
//! sources in tests); [`CatalogClient`] holds the browse logic on top of it. Failures
//! never reach the caller: they are logged and the lookup yields an empty list.

pub mod error;
pub mod http;

pub use error::CatalogError;
pub use http::HttpCatalog;

use crate::config::StoreConfig;
use crate::model::{BrowseFilter, CatalogItem};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// One catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Free-text search by meal name.
    Search(String),
    FilterCategory(String),
    FilterArea(String),
    Random,
    Categories,
    Areas,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Search(_) => "search.php",
            Endpoint::FilterCategory(_) | Endpoint::FilterArea(_) => "filter.php",
            Endpoint::Random => "random.php",
            Endpoint::Categories | Endpoint::Areas => "list.php",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Search(term) => vec![("s", term.clone())],
            Endpoint::FilterCategory(category) => vec![("c", category.clone())],
            Endpoint::FilterArea(area) => vec![("a", area.clone())],
            Endpoint::Random => Vec::new(),
            Endpoint::Categories => vec![("c", "list".to_string())],
            Endpoint::Areas => vec![("a", "list".to_string())],
        }
    }
}

/// Transport seam: fetch the raw JSON body of one endpoint.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, CatalogError>;
}

#[derive(Clone)]
pub struct CatalogClient {
    source: Arc<dyn CatalogSource>,
    browse_random_count: usize,
    featured_count: usize,
}

impl CatalogClient {
    pub fn new(source: Arc<dyn CatalogSource>, config: &StoreConfig) -> Self {
        Self {
            source,
            browse_random_count: config.browse_random_count,
            featured_count: config.featured_count,
        }
    }

    /// Browse page lookup. The first non-empty field wins, in the order
    /// search, category, area; an empty filter shows random meals.
    #[instrument(skip(self))]
    pub async fn browse(&self, filter: &BrowseFilter) -> Vec<CatalogItem> {
        let set = |value: &Option<String>| value.as_deref().filter(|v| !v.trim().is_empty()).map(str::to_string);

        if let Some(term) = set(&filter.search) {
            self.search(&term).await
        } else if let Some(category) = set(&filter.category) {
            self.by_category(&category).await
        } else if let Some(area) = set(&filter.area) {
            self.by_area(&area).await
        } else {
            self.random(self.browse_random_count).await
        }
    }

    /// Home page selection.
    pub async fn featured(&self) -> Vec<CatalogItem> {
        self.random(self.featured_count).await
    }

    pub async fn search(&self, term: &str) -> Vec<CatalogItem> {
        decode_items(self.meals(&Endpoint::Search(term.to_string())).await)
    }

    pub async fn by_category(&self, category: &str) -> Vec<CatalogItem> {
        decode_items(self.meals(&Endpoint::FilterCategory(category.to_string())).await)
    }

    pub async fn by_area(&self, area: &str) -> Vec<CatalogItem> {
        decode_items(self.meals(&Endpoint::FilterArea(area.to_string())).await)
    }

    /// `count` independent random requests, issued one after another. Duplicates are
    /// kept; failed requests contribute nothing.
    #[instrument(skip(self))]
    pub async fn random(&self, count: usize) -> Vec<CatalogItem> {
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.extend(decode_items(self.meals(&Endpoint::Random).await));
        }
        debug!(requested = count, received = items.len(), "Random meals");
        items
    }

    pub async fn categories(&self) -> Vec<String> {
        names(self.meals(&Endpoint::Categories).await, "strCategory")
    }

    pub async fn areas(&self) -> Vec<String> {
        names(self.meals(&Endpoint::Areas).await, "strArea")
    }

    async fn meals(&self, endpoint: &Endpoint) -> Vec<Value> {
        let body = match self.source.fetch(endpoint).await {
            Ok(body) => body,
            Err(e) => {
                error!(?endpoint, error = %e, "Catalog request failed");
                return Vec::new();
            }
        };
        match body.get("meals") {
            Some(Value::Array(meals)) => meals.clone(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                warn!(?endpoint, meals = %other, "Unexpected meals field");
                Vec::new()
            }
        }
    }
}

fn decode_items(records: Vec<Value>) -> Vec<CatalogItem> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<CatalogItem>(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "Skipping malformed meal");
                None
            }
        })
        .collect()
}

fn names(records: Vec<Value>, field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.get(field).and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}
