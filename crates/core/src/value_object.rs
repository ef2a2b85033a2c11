//! Value object trait: equality by value, not identity.
//!
//! Value objects have no identity of their own; two value objects holding the
//! same attributes are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new value (for example `CartLineItem::incremented` returns a fresh
/// line item rather than bumping a field on a shared one).
///
/// - **Value Object**: `CartLineItem { product, quantity: 2 }`
/// - **Entity**: `Product { id: Some(ProductId("7")), .. }`
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
