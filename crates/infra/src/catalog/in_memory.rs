use async_trait::async_trait;

use storefront_catalog::{PageNumber, Product};

use super::{CatalogError, CatalogService};

/// Fixed product list served in pages; for tests/dev.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    page_size: u32,
}

impl InMemoryCatalog {
    /// `page_size` of 0 is treated as 1.
    pub fn new(products: Vec<Product>, page_size: u32) -> Self {
        Self {
            products,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn get_products(&self, page: PageNumber) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products
            .iter()
            .skip(page.offset(self.page_size))
            .take(self.page_size as usize)
            .cloned()
            .collect())
    }
}
