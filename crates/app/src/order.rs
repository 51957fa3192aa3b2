//! Order files: a saved selection replayed into one of the stores.
//!
//! ```json
//! {
//!   "mode": "limited",
//!   "customer": { "name": "Anita Rao", "guestCount": 280 },
//!   "lines": [{ "item": "veg-starter-1", "quantity": 2 }]
//! }
//! ```

use engine::{
    Catalog, CategoryLimit, CustomerInfo, LimitedSelectionStore, MoneyCents, SelectionStore,
};
use export::{BusinessInfo, MenuDocument};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    #[default]
    Standard,
    Limited,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderLine {
    pub item: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderFile {
    pub mode: OrderMode,
    pub customer: Option<CustomerInfo>,
    pub lines: Vec<OrderLine>,
}

/// A store filled from an order.
#[derive(Debug)]
pub enum Cart {
    Standard(SelectionStore),
    Limited(LimitedSelectionStore),
}

impl OrderFile {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Dispatches every line into a fresh store, the same way a user clicking
    /// through the menu would. Unknown items abort the replay.
    pub fn replay(&self, catalog: &Catalog, limits: Vec<CategoryLimit>) -> Result<Cart> {
        let mut items = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let item = catalog.require_item(&line.item)?;
            items.push((item.clone(), line.quantity));
        }

        let cart = match self.mode {
            OrderMode::Standard => {
                let mut store = SelectionStore::new();
                for (item, quantity) in items {
                    store.add_item(item, quantity);
                }
                Cart::Standard(store)
            }
            OrderMode::Limited => {
                let mut store = LimitedSelectionStore::new(limits);
                for (item, quantity) in items {
                    for _ in 0..quantity {
                        store.add_item(item.clone());
                    }
                }
                Cart::Limited(store)
            }
        };
        tracing::debug!(mode = ?self.mode, lines = self.lines.len(), "order replayed");
        Ok(cart)
    }
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        match self {
            Cart::Standard(store) => store.is_empty(),
            Cart::Limited(store) => store.is_empty(),
        }
    }

    pub fn grand_total(&self) -> MoneyCents {
        match self {
            Cart::Standard(store) => store.total_price(),
            Cart::Limited(store) => store.grand_total(),
        }
    }

    pub fn document(&self, business: BusinessInfo, catalog: &Catalog) -> MenuDocument {
        match self {
            Cart::Standard(store) => {
                MenuDocument::from_selections(business, store.selections(), catalog)
            }
            Cart::Limited(store) => {
                MenuDocument::from_limited(business, store.selections(), catalog)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::{EngineError, MenuCategory, MenuItem};

    use super::*;
    use crate::error::AppError;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![MenuCategory::new("starters", "Starters", 1)],
            vec![
                MenuItem::new("a", "Corn Fry", "starters", MoneyCents::new(100_00)),
                MenuItem::new("b", "Veg Manchurian", "starters", MoneyCents::new(120_00)),
            ],
        )
    }

    fn limits() -> Vec<CategoryLimit> {
        vec![CategoryLimit::new("starters", 2, "Starters")]
    }

    #[test]
    fn standard_order_fills_the_plain_store() {
        let order = OrderFile::from_json(
            r#"{"lines": [{"item": "a", "quantity": 2}, {"item": "b", "quantity": 1}]}"#,
        )
        .unwrap();
        assert_eq!(order.mode, OrderMode::Standard);

        let Cart::Standard(store) = order.replay(&catalog(), limits()).unwrap() else {
            panic!("expected a standard cart");
        };
        assert_eq!(store.total_items(), 3);
        assert_eq!(store.total_price(), MoneyCents::new(320_00));
    }

    #[test]
    fn limited_order_is_allocated() {
        let order = OrderFile::from_json(
            r#"{"mode": "limited", "customer": {"name": "Ravi"},
                "lines": [{"item": "a", "quantity": 1}, {"item": "b", "quantity": 2}]}"#,
        )
        .unwrap();
        assert_eq!(order.customer.as_ref().and_then(|c| c.name.as_deref()), Some("Ravi"));

        let cart = order.replay(&catalog(), limits()).unwrap();
        let Cart::Limited(store) = &cart else {
            panic!("expected a limited cart");
        };
        assert!(store.selection("a").unwrap().is_add_on());
        assert_eq!(store.total_price(), MoneyCents::new(240_00));
        assert_eq!(store.total_add_on_price(), MoneyCents::new(100_00));
        assert_eq!(cart.grand_total(), MoneyCents::new(340_00));
    }

    #[test]
    fn unknown_item_is_rejected() {
        let order = OrderFile {
            lines: vec![OrderLine {
                item: "zzz".to_string(),
                quantity: 1,
            }],
            ..Default::default()
        };
        assert!(matches!(
            order.replay(&catalog(), limits()),
            Err(AppError::Engine(EngineError::KeyNotFound(id))) if id == "zzz"
        ));
    }
}
