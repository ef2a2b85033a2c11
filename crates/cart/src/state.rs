use storefront_catalog::{Product, ProductId};

use crate::line_item::CartLineItem;

/// Cart aggregate: the ordered line items plus whether the persisted cart
/// has been loaded yet.
///
/// Every transition returns a brand-new `CartState`; existing values (and the
/// line items inside them) are never modified, so a state handed to an
/// observer stays exactly as it was observed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    items: Vec<CartLineItem>,
    loaded: bool,
}

impl CartState {
    /// The initial state of a session: empty and not yet loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state once persisted items have been loaded.
    ///
    /// Lines for the same product are folded into the first of them, summing
    /// quantities. Lines whose product has no id are kept as they are.
    pub fn loaded_with(items: Vec<CartLineItem>) -> Self {
        let mut folded: Vec<CartLineItem> = Vec::with_capacity(items.len());
        for line in items {
            match folded.iter().position(|kept| kept.holds(line.product())) {
                Some(index) => folded[index] = folded[index].combined(&line),
                None => folded.push(line),
            }
        }

        Self {
            items: folded,
            loaded: true,
        }
    }

    /// Add one unit of `product`.
    ///
    /// If a line for the same product identity exists it is replaced by a
    /// new line with quantity + 1 (position preserved); otherwise a new
    /// single-unit line is appended. `loaded` passes through unchanged.
    pub fn with_added(&self, product: Product) -> Self {
        let items = match self.items.iter().position(|line| line.holds(&product)) {
            Some(index) => self
                .items
                .iter()
                .enumerate()
                .map(|(i, line)| if i == index { line.incremented() } else { line.clone() })
                .collect(),
            None => {
                let mut items = Vec::with_capacity(self.items.len() + 1);
                items.extend(self.items.iter().cloned());
                items.push(CartLineItem::new(product));
                items
            }
        };

        Self {
            items,
            loaded: self.loaded,
        }
    }

    /// Apply `with_added` for each product in order.
    pub fn with_all_added<I>(&self, products: I) -> Self
    where
        I: IntoIterator<Item = Product>,
    {
        products
            .into_iter()
            .fold(self.clone(), |state, product| state.with_added(product))
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity())).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    pub fn line_for(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items
            .iter()
            .find(|line| line.product_id() == Some(product_id))
    }
}
