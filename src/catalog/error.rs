//! Error types for the catalog client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure, timeout or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("Catalog returned {status} for {url}")]
    Status { status: u16, url: String },
}
