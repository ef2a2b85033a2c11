//! Cart persistence: a byte-oriented key/value store plus the cart codec on top.
//!
//! The layering mirrors browser local storage: the store only knows keys and
//! bytes, `KeyValueCartStore` decides which key holds the cart and how the
//! line items are encoded (JSON text, no versioning).

pub mod cart_store;
pub mod file_store;
pub mod key_value;

pub use cart_store::{CartPersistence, KeyValueCartStore, PersistenceError, DEFAULT_CART_KEY};
pub use file_store::{FileKeyValueStore, is_valid_key};
pub use key_value::{InMemoryKeyValueStore, KeyValueStore, StorageError};
