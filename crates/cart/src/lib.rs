//! Cart domain module.
//!
//! Business rules for the shopping cart, implemented purely as deterministic
//! value transitions (no IO, no async, no storage). The stateful service
//! that owns a cart for a session is `storefront-infra::cart_ledger`.

pub mod event;
pub mod line_item;
pub mod state;

pub use event::CartEvent;
pub use line_item::CartLineItem;
pub use state::CartState;
