//! Integration tests for the full storefront flow.
//!
//! Tests: Catalog → CatalogBrowser → CartLedger → FileKeyValueStore → restart
//!
//! Verifies:
//! - Products picked from a catalog page land in the cart and survive a restart
//! - A corrupt cart file fails open and is overwritten by the next add
//! - Observers see the same transitions the ledger reports

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use storefront_cart::CartEvent;
    use storefront_catalog::{PageNumber, Product};
    use storefront_events::InMemoryEventBus;
    use storefront_observability::LogFormat;

    use crate::cart_ledger::CartLedger;
    use crate::catalog::{CatalogBrowser, InMemoryCatalog, ListingStatus};
    use crate::config::StorefrontConfig;
    use crate::persistence::{FileKeyValueStore, KeyValueStore};

    type Bus = Arc<InMemoryEventBus<CartEvent>>;

    fn catalog() -> InMemoryCatalog {
        let products = (1..=20u64)
            .map(|i| Product::new(i, format!("Product {i}"), i as f64 * 1.5).with_category("misc"))
            .collect();
        InMemoryCatalog::new(products, 8)
    }

    fn start_ledger(config: &StorefrontConfig) -> CartLedger<Bus> {
        storefront_observability::init_with(LogFormat::Text);
        CartLedger::start(Arc::new(config.cart_store()), Arc::new(InMemoryEventBus::new()))
    }

    #[tokio::test]
    async fn browse_add_restart_and_reload() {
        let scratch = TempDir::new().unwrap();
        let config = StorefrontConfig::default().with_cart_dir(scratch.path());
        let mut browser = CatalogBrowser::new(catalog());

        let ledger = start_ledger(&config);
        ledger.wait_until_loaded().await;
        assert_eq!(ledger.count(), 0);

        let first_page = browser.change_page(PageNumber::FIRST).await.products.clone();
        assert_eq!(first_page.len(), 8);
        ledger.add(first_page[0].clone());
        ledger.add(first_page[0].clone());

        let second_page = browser.next_page().await;
        assert_eq!(second_page.status, ListingStatus::Ready);
        let picked = second_page.products[3].clone();
        ledger.add(picked.clone());

        assert_eq!(ledger.count(), 3);
        ledger.shutdown().await;

        let restarted = start_ledger(&config);
        let state = restarted.wait_until_loaded().await;

        assert_eq!(state.count(), 3);
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.items()[0].product(), &first_page[0]);
        assert_eq!(state.items()[0].quantity(), 2);
        assert_eq!(state.items()[1].product(), &picked);

        let merged = restarted.add(picked);
        assert_eq!(merged.items()[1].quantity(), 2);
        restarted.shutdown().await;
    }

    #[tokio::test]
    async fn corrupt_cart_file_starts_empty_and_is_replaced() {
        let scratch = TempDir::new().unwrap();
        let dir = scratch.path();
        let config = StorefrontConfig::default().with_cart_dir(dir).with_cart_key("session");
        FileKeyValueStore::new(dir)
            .put("session", b"{not json".to_vec())
            .await
            .unwrap();

        let ledger = start_ledger(&config);
        let events = ledger.events();
        let state = ledger.wait_until_loaded().await;
        assert!(state.is_loaded());
        assert!(state.is_empty());
        assert!(matches!(events.recv().unwrap(), CartEvent::Loaded { recovered: true, .. }));

        ledger.add(Product::new("x", "Replacement", 2.0));
        ledger.shutdown().await;

        let raw = FileKeyValueStore::new(dir).get("session").await.unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(stored[0]["product"]["id"], "x");
        assert_eq!(stored[0]["quantity"], 1);
    }

    #[tokio::test]
    async fn observers_and_ledger_agree() {
        let scratch = TempDir::new().unwrap();
        let config = StorefrontConfig::default().with_cart_dir(scratch.path());
        let ledger = start_ledger(&config);
        let mut states = ledger.subscribe();
        ledger.wait_until_loaded().await;

        let product = Product::new(5u64, "Badge", 3.0);
        for _ in 0..4 {
            ledger.add(product.clone());
        }

        let observed = states.wait_for(|s| s.count() == 4).await.unwrap().clone();
        assert_eq!(observed, ledger.state());
        assert_eq!(observed.total_price(), 12.0);
        ledger.shutdown().await;
    }
}
