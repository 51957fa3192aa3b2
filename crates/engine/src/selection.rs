//! Unlimited selection store (the generic cart).
//!
//! Every mutation goes through [`SelectionStore::dispatch`], which recomputes
//! both totals from scratch once the selection list has been updated.
//!
//! Quantities are `u32`: increments saturate and absolute updates above
//! `u32::MAX` are clamped, so no mutation can fail.

use serde::Serialize;

use crate::{MenuItem, MoneyCents};

/// An item and how many units of it were chosen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub item: MenuItem,
    pub quantity: u32,
}

impl Selection {
    #[must_use]
    pub fn line_total(&self) -> MoneyCents {
        self.item.price.times(self.quantity)
    }
}

/// Mutations accepted by [`SelectionStore`].
#[derive(Clone, Debug)]
pub enum SelectionAction {
    AddItem { item: MenuItem, quantity: u32 },
    RemoveItem { item_id: String },
    /// Absolute quantity; `<= 0` removes the item, values above `u32::MAX`
    /// are clamped.
    UpdateQuantity { item_id: String, quantity: i64 },
    Clear,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SelectionStore {
    selections: Vec<Selection>,
    total_price: MoneyCents,
    total_items: u64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: SelectionAction) {
        tracing::debug!(?action, "selection dispatch");
        match action {
            SelectionAction::AddItem { item, quantity } => {
                if let Some(existing) = self.find_mut(&item.id) {
                    existing.quantity = existing.quantity.saturating_add(quantity);
                } else if quantity > 0 {
                    self.selections.push(Selection { item, quantity });
                }
            }
            SelectionAction::RemoveItem { item_id } => {
                self.selections.retain(|s| s.item.id != item_id);
            }
            SelectionAction::UpdateQuantity { item_id, quantity } => {
                if quantity <= 0 {
                    return self.dispatch(SelectionAction::RemoveItem { item_id });
                }
                let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                if let Some(existing) = self.find_mut(&item_id) {
                    existing.quantity = quantity;
                }
            }
            SelectionAction::Clear => self.selections.clear(),
        }
        self.recompute();
    }

    pub fn add_item(&mut self, item: MenuItem, quantity: u32) {
        self.dispatch(SelectionAction::AddItem { item, quantity });
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.dispatch(SelectionAction::RemoveItem {
            item_id: item_id.to_string(),
        });
    }

    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) {
        self.dispatch(SelectionAction::UpdateQuantity {
            item_id: item_id.to_string(),
            quantity,
        });
    }

    pub fn clear(&mut self) {
        self.dispatch(SelectionAction::Clear);
    }

    /// Current quantity of an item, 0 when it is not selected.
    pub fn quantity(&self, item_id: &str) -> u32 {
        self.selections
            .iter()
            .find(|s| s.item.id == item_id)
            .map_or(0, |s| s.quantity)
    }

    /// Selections in insertion order.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn total_price(&self) -> MoneyCents {
        self.total_price
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    fn find_mut(&mut self, item_id: &str) -> Option<&mut Selection> {
        self.selections.iter_mut().find(|s| s.item.id == item_id)
    }

    fn recompute(&mut self) {
        self.total_price = self.selections.iter().map(Selection::line_total).sum();
        self.total_items = self.selections.iter().map(|s| u64::from(s.quantity)).sum();
    }
}
