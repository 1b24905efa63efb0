//! HTTP transport for the catalog service.

use super::{CatalogError, CatalogSource, Endpoint};
use crate::config::StoreConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Fetches catalog endpoints over HTTP+JSON.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(config: &StoreConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.catalog_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.catalog_base_url.clone(),
        })
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, CatalogError> {
        let url = self.url(endpoint);
        debug!(%url, query = ?endpoint.query(), "GET");

        let response = self.client.get(&url).query(&endpoint.query()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let config = StoreConfig {
            catalog_base_url: "https://meals.test/api/".to_string(),
            ..StoreConfig::default()
        };
        let catalog = HttpCatalog::new(&config).unwrap();

        assert_eq!(catalog.url(&Endpoint::Random), "https://meals.test/api/random.php");
        assert_eq!(
            catalog.url(&Endpoint::Search("pie".to_string())),
            "https://meals.test/api/search.php"
        );
    }
}
