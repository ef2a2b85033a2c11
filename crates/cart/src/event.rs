use serde::{Deserialize, Serialize};

use storefront_catalog::{Product, ProductId};
use storefront_events::Event;

use crate::state::CartState;

/// Notification published after each cart state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// The persisted cart finished loading (or failed and the cart started empty).
    Loaded {
        item_count: usize,
        unit_count: u64,
        /// True when the persisted cart could not be read.
        recovered: bool,
    },
    /// One unit of a product was added.
    ItemAdded {
        product_id: Option<ProductId>,
        /// Quantity of the affected line after the add.
        quantity: u32,
        unit_count: u64,
    },
}

impl CartEvent {
    pub fn loaded(state: &CartState, recovered: bool) -> Self {
        CartEvent::Loaded {
            item_count: state.items().len(),
            unit_count: state.count(),
            recovered,
        }
    }

    /// Describe the add of `product` that produced `state`.
    pub fn item_added(product: &Product, state: &CartState) -> Self {
        let product_id = product.product_id().cloned();
        let quantity = match &product_id {
            Some(id) => state.line_for(id).map_or(1, |line| line.quantity()),
            None => 1,
        };

        CartEvent::ItemAdded {
            product_id,
            quantity,
            unit_count: state.count(),
        }
    }

    pub fn unit_count(&self) -> u64 {
        match self {
            CartEvent::Loaded { unit_count, .. } | CartEvent::ItemAdded { unit_count, .. } => {
                *unit_count
            }
        }
    }
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::Loaded { .. } => "cart.loaded",
            CartEvent::ItemAdded { .. } => "cart.item_added",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_added_reports_line_quantity_and_total_units() {
        let backpack = Product::new("a", "Backpack", 10.0);
        let state = CartState::new()
            .with_added(Product::new("b", "Ring", 1.0))
            .with_added(backpack.clone())
            .with_added(backpack.clone());

        let event = CartEvent::item_added(&backpack, &state);

        assert_eq!(
            event,
            CartEvent::ItemAdded {
                product_id: Some(ProductId::new("a")),
                quantity: 2,
                unit_count: 3,
            }
        );
        assert_eq!(event.event_type(), "cart.item_added");
        assert_eq!(event.version(), 1);
    }

    #[test]
    fn loaded_event_summarises_state() {
        let state = CartState::loaded_with(vec![]);
        let event = CartEvent::loaded(&state, true);

        assert_eq!(event.event_type(), "cart.loaded");
        assert_eq!(event.unit_count(), 0);
        assert!(matches!(event, CartEvent::Loaded { recovered: true, item_count: 0, .. }));
    }

    #[test]
    fn serialises_with_type_tag() {
        let event = CartEvent::ItemAdded {
            product_id: Some(ProductId::new("7")),
            quantity: 1,
            unit_count: 1,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "item_added");
        assert_eq!(value["product_id"], "7");
    }
}
