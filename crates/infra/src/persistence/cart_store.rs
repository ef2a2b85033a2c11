use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use storefront_cart::CartLineItem;

use super::key_value::{KeyValueStore, StorageError};

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("persisted cart is corrupt: {0}")]
    Corrupt(String),

    #[error("failed to encode cart: {0}")]
    Encode(String),
}

/// Load/save the cart's line items.
///
/// `load_cart_items` returns an empty list when nothing was persisted yet;
/// an error means the stored data exists but could not be read.
#[async_trait]
pub trait CartPersistence: Send + Sync {
    async fn load_cart_items(&self) -> Result<Vec<CartLineItem>, PersistenceError>;

    async fn save_cart_items(&self, items: &[CartLineItem]) -> Result<(), PersistenceError>;
}

#[async_trait]
impl<P> CartPersistence for Arc<P>
where
    P: CartPersistence + ?Sized,
{
    async fn load_cart_items(&self) -> Result<Vec<CartLineItem>, PersistenceError> {
        (**self).load_cart_items().await
    }

    async fn save_cart_items(&self, items: &[CartLineItem]) -> Result<(), PersistenceError> {
        (**self).save_cart_items(items).await
    }
}

/// Cart persistence over a key/value store: one key, a JSON array of
/// `{ "product": .., "quantity": .. }` records.
#[derive(Debug, Clone)]
pub struct KeyValueCartStore<S> {
    store: S,
    key: String,
}

impl<S> KeyValueCartStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CART_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S> CartPersistence for KeyValueCartStore<S>
where
    S: KeyValueStore,
{
    async fn load_cart_items(&self) -> Result<Vec<CartLineItem>, PersistenceError> {
        let Some(bytes) = self.store.get(&self.key).await? else {
            debug!(key = %self.key, "no persisted cart");
            return Ok(Vec::new());
        };

        serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }

    async fn save_cart_items(&self, items: &[CartLineItem]) -> Result<(), PersistenceError> {
        let bytes =
            serde_json::to_vec(items).map_err(|e| PersistenceError::Encode(e.to_string()))?;
        self.store.put(&self.key, bytes).await?;
        Ok(())
    }
}
