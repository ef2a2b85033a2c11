//! Catalog retrieval: the paginated product source and the page-browsing state on top of it.

pub mod browser;
pub mod http;
pub mod in_memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use storefront_catalog::{PageNumber, Product};

pub use browser::{CatalogBrowser, ListingStatus, ProductListing};
pub use http::HttpCatalogClient;
pub use in_memory::InMemoryCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Network(String),

    #[error("catalog responded with status {0}")]
    Status(u16),

    #[error("failed to decode catalog response: {0}")]
    Decode(String),
}

/// Read-only, paginated product source.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn get_products(&self, page: PageNumber) -> Result<Vec<Product>, CatalogError>;
}

#[async_trait]
impl<C> CatalogService for Arc<C>
where
    C: CatalogService + ?Sized,
{
    async fn get_products(&self, page: PageNumber) -> Result<Vec<Product>, CatalogError> {
        (**self).get_products(page).await
    }
}
