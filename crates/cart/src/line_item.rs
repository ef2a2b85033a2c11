use serde::{Deserialize, Serialize};

use storefront_catalog::{Product, ProductId};
use storefront_core::{DomainError, DomainResult, Entity, ValueObject};

/// One product's presence in the cart.
///
/// Invariant: `quantity >= 1`. A line whose quantity would drop to zero is
/// removed from the cart instead of being kept around empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireLineItem")]
pub struct CartLineItem {
    product: Product,
    quantity: u32,
}

impl ValueObject for CartLineItem {}

impl CartLineItem {
    /// A fresh line holding a single unit.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn with_quantity(product: Product, quantity: u32) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::invariant("line item quantity must be at least 1"));
        }
        Ok(Self { product, quantity })
    }

    /// A new line for the same product with one more unit.
    pub fn incremented(&self) -> Self {
        Self {
            product: self.product.clone(),
            quantity: self.quantity.saturating_add(1),
        }
    }

    /// A new line holding the units of both lines; `self`'s product record wins.
    pub fn combined(&self, other: &CartLineItem) -> Self {
        Self {
            product: self.product.clone(),
            quantity: self.quantity.saturating_add(other.quantity),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_id(&self) -> Option<&ProductId> {
        self.product.product_id()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn subtotal(&self) -> f64 {
        self.product.price() * f64::from(self.quantity)
    }

    /// Whether this line holds the given product (by identity).
    pub fn holds(&self, product: &Product) -> bool {
        self.product.same_identity(product)
    }
}

#[derive(Deserialize)]
struct WireLineItem {
    product: Product,
    quantity: u32,
}

impl TryFrom<WireLineItem> for CartLineItem {
    type Error = DomainError;

    fn try_from(value: WireLineItem) -> Result<Self, Self::Error> {
        Self::with_quantity(value.product, value.quantity)
    }
}
