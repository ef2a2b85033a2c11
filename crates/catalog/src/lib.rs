//! Catalog domain module.
//!
//! Read-only catalog records as the storefront sees them, implemented purely
//! as values (no IO, no HTTP, no storage). Fetching pages of products is an
//! infrastructure concern (`storefront-infra::catalog`).

pub mod page;
pub mod product;

pub use page::PageNumber;
pub use product::{Product, ProductId};
