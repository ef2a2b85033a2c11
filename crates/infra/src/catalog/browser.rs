use tracing::{info, warn};

use storefront_catalog::{PageNumber, Product};

use super::CatalogService;

/// Outcome of the most recent page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingStatus {
    /// No page requested yet.
    Idle,
    Ready,
    /// The last fetch failed; `products` is empty.
    Error(String),
}

/// What a product-list view renders: the current page and its products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub page: PageNumber,
    pub products: Vec<Product>,
    pub status: ListingStatus,
}

impl ProductListing {
    pub fn is_error(&self) -> bool {
        matches!(self.status, ListingStatus::Error(_))
    }
}

impl Default for ProductListing {
    fn default() -> Self {
        Self {
            page: PageNumber::FIRST,
            products: Vec::new(),
            status: ListingStatus::Idle,
        }
    }
}

/// Page-by-page catalog browsing.
///
/// A failed fetch never propagates: the listing switches to an empty product
/// list with [`ListingStatus::Error`]. There is no automatic retry; the next
/// `change_page` call is the retry.
#[derive(Debug)]
pub struct CatalogBrowser<C> {
    catalog: C,
    listing: ProductListing,
}

impl<C> CatalogBrowser<C>
where
    C: CatalogService,
{
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            listing: ProductListing::default(),
        }
    }

    pub fn listing(&self) -> &ProductListing {
        &self.listing
    }

    /// Fetch `page` and make it the current listing.
    pub async fn change_page(&mut self, page: PageNumber) -> &ProductListing {
        self.listing = match self.catalog.get_products(page).await {
            Ok(products) => {
                info!(page = page.get(), products = products.len(), "catalog page loaded");
                ProductListing {
                    page,
                    products,
                    status: ListingStatus::Ready,
                }
            }
            Err(err) => {
                warn!(page = page.get(), error = %err, "catalog page fetch failed");
                ProductListing {
                    page,
                    products: Vec::new(),
                    status: ListingStatus::Error(err.to_string()),
                }
            }
        };
        &self.listing
    }

    /// Re-fetch the current page.
    pub async fn reload(&mut self) -> &ProductListing {
        let page = self.listing.page;
        self.change_page(page).await
    }

    pub async fn next_page(&mut self) -> &ProductListing {
        let page = self.listing.page.next();
        self.change_page(page).await
    }

    pub async fn previous_page(&mut self) -> &ProductListing {
        let page = self.listing.page.previous();
        self.change_page(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, InMemoryCatalog};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn catalog() -> InMemoryCatalog {
        let products = (1..=3u64)
            .map(|i| Product::new(i, format!("Product {i}"), 2.0))
            .collect();
        InMemoryCatalog::new(products, 2)
    }

    /// Fails the first `failures` requests, then delegates.
    struct Flaky {
        inner: InMemoryCatalog,
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogService for Flaky {
        async fn get_products(&self, page: PageNumber) -> Result<Vec<Product>, CatalogError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                return Err(CatalogError::Status(500));
            }
            self.inner.get_products(page).await
        }
    }

    #[tokio::test]
    async fn starts_idle_on_first_page() {
        let browser = CatalogBrowser::new(catalog());
        assert_eq!(browser.listing().status, ListingStatus::Idle);
        assert_eq!(browser.listing().page, PageNumber::FIRST);
    }

    #[tokio::test]
    async fn paging_forward_and_back() {
        let mut browser = CatalogBrowser::new(catalog());

        let first = browser.change_page(PageNumber::FIRST).await.clone();
        assert_eq!(first.status, ListingStatus::Ready);
        assert_eq!(first.products.len(), 2);

        let second = browser.next_page().await;
        assert_eq!(second.page.get(), 2);
        assert_eq!(second.products.len(), 1);

        let back = browser.previous_page().await;
        assert_eq!(back.page, PageNumber::FIRST);
        assert_eq!(back.products[0].title(), "Product 1");
    }

    #[tokio::test]
    async fn failure_yields_empty_list_and_error_status() {
        let mut browser = CatalogBrowser::new(Flaky {
            inner: catalog(),
            failures: 1,
            calls: AtomicUsize::new(0),
        });

        let listing = browser.change_page(PageNumber::FIRST).await;
        assert!(listing.is_error());
        assert!(listing.products.is_empty());

        // No automatic retry: only an explicit request fetches again.
        assert_eq!(browser.catalog.calls.load(Ordering::SeqCst), 1);

        let listing = browser.reload().await;
        assert_eq!(listing.status, ListingStatus::Ready);
        assert_eq!(listing.products.len(), 2);
    }

    #[tokio::test]
    async fn failure_replaces_previous_products() {
        let mut browser = CatalogBrowser::new(Flaky {
            inner: catalog(),
            failures: 0,
            calls: AtomicUsize::new(0),
        });
        browser.change_page(PageNumber::FIRST).await;
        assert_eq!(browser.listing().products.len(), 2);

        browser.catalog.failures = 5;
        let listing = browser.next_page().await;
        assert!(listing.is_error());
        assert!(listing.products.is_empty());
        assert_eq!(listing.page.get(), 2);
    }
}
