//! Infrastructure layer: the cart ledger service, storage, catalog clients, config.
//!
//! Domain rules live in `storefront-cart` / `storefront-catalog`; this crate
//! wires them to async IO (key/value persistence, HTTP) and to observers.

pub mod cart_ledger;
pub mod catalog;
pub mod config;
pub mod persistence;

mod integration_tests;

pub use cart_ledger::CartLedger;
pub use catalog::{CatalogBrowser, CatalogError, CatalogService, HttpCatalogClient, InMemoryCatalog};
pub use config::StorefrontConfig;
pub use persistence::{
    CartPersistence, FileKeyValueStore, InMemoryKeyValueStore, KeyValueCartStore, KeyValueStore,
    PersistenceError, StorageError,
};
