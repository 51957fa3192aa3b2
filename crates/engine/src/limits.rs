//! Category-limited selection store.
//!
//! Packages offer "choose any N" per category: the first `N` units of a
//! category are included in the package price (base units), every further
//! unit is billed as an add-on. After every mutation the store runs an
//! allocation pass over the whole selection list:
//!
//! 1. selections are grouped by category;
//! 2. inside a group, higher quantities are served first; equal quantities
//!    keep insertion order;
//! 3. each selection takes `min(quantity, allowance left)` base units and the
//!    rest becomes add-on units.
//!
//! A selection with at least one add-on unit is flagged as an add-on as a
//! whole, while the totals still split its units between base and add-on
//! prices. Categories without a configured limit have an allowance of 0.
//!
//! As in the unlimited store, quantities saturate at `u32::MAX`; per-category
//! sums are `u64`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{MenuItem, MoneyCents};

/// Free allowance for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLimit {
    pub category_id: String,
    pub limit: u32,
    pub name: String,
}

impl CategoryLimit {
    pub fn new(category_id: impl Into<String>, limit: u32, name: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            limit,
            name: name.into(),
        }
    }
}

/// The allowance table used when nothing else is configured.
pub fn default_category_limits() -> Vec<CategoryLimit> {
    vec![
        CategoryLimit::new("veg-starters", 2, "Veg Starters"),
        CategoryLimit::new("veg-mains", 3, "Veg Main Course"),
        CategoryLimit::new("nonveg-starters", 2, "Non-Veg Starters"),
        CategoryLimit::new("nonveg-mains", 3, "Non-Veg Main Course"),
        CategoryLimit::new("rice-biryanis", 2, "Rice & Biryanis"),
        CategoryLimit::new("breads", 3, "Breads"),
        CategoryLimit::new("desserts", 2, "Desserts"),
        CategoryLimit::new("beverages", 2, "Beverages"),
    ]
}

/// A selection partitioned into base and add-on units.
///
/// `is_add_on` and `base_quantity` are owned by the allocation pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LimitedSelection {
    pub item: MenuItem,
    pub quantity: u32,
    is_add_on: bool,
    base_quantity: u32,
}

impl LimitedSelection {
    fn new(item: MenuItem) -> Self {
        Self {
            item,
            quantity: 1,
            is_add_on: false,
            base_quantity: 0,
        }
    }

    pub fn is_add_on(&self) -> bool {
        self.is_add_on
    }

    /// Units counted inside the category allowance.
    pub fn base_quantity(&self) -> u32 {
        self.base_quantity
    }

    /// Units billed on top of the package.
    pub fn add_on_quantity(&self) -> u32 {
        self.quantity - self.base_quantity
    }

    pub fn line_total(&self) -> MoneyCents {
        self.item.price.times(self.quantity)
    }
}

/// Price totals produced by [`allocate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AllocationTotals {
    pub base_price: MoneyCents,
    pub add_on_price: MoneyCents,
}

/// Runs the allocation pass in place and returns the price split.
///
/// The order of `selections` is left untouched; only the derived fields are
/// rewritten.
pub fn allocate(selections: &mut [LimitedSelection], limits: &[CategoryLimit]) -> AllocationTotals {
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    for (index, selection) in selections.iter().enumerate() {
        let category = selection.item.category.as_str();
        match groups.iter_mut().find(|(id, _)| *id == category) {
            Some((_, members)) => members.push(index),
            None => groups.push((category, vec![index])),
        }
    }

    let groups: Vec<(u32, Vec<usize>)> = groups
        .into_iter()
        .map(|(category, mut members)| {
            // `sort_by_key` is stable: equal quantities keep insertion order.
            members.sort_by_key(|&i| std::cmp::Reverse(selections[i].quantity));
            (allowance(limits, category), members)
        })
        .collect();

    let mut totals = AllocationTotals::default();
    for (allowance, members) in groups {
        let mut allocated = 0u32;
        for index in members {
            let selection = &mut selections[index];
            let room = allowance.saturating_sub(allocated);
            let base = selection.quantity.min(room);
            let add_on = selection.quantity - base;

            selection.base_quantity = base;
            selection.is_add_on = add_on > 0;
            allocated += base;

            totals.base_price += selection.item.price.times(base);
            totals.add_on_price += selection.item.price.times(add_on);
        }
    }
    totals
}

fn allowance(limits: &[CategoryLimit], category_id: &str) -> u32 {
    limits
        .iter()
        .find(|l| l.category_id == category_id)
        .map_or(0, |l| l.limit)
}

/// Mutations accepted by [`LimitedSelectionStore`].
#[derive(Clone, Debug)]
pub enum LimitedAction {
    /// Adds one unit.
    AddItem { item: MenuItem },
    RemoveItem { item_id: String },
    /// Absolute quantity; `<= 0` removes the item, values above `u32::MAX`
    /// are clamped.
    UpdateQuantity { item_id: String, quantity: i64 },
    /// Empties the selections, keeping the limits.
    Clear,
    SetCategoryLimits(Vec<CategoryLimit>),
}

/// Allowance usage for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryUsage {
    pub category_id: String,
    pub name: Option<String>,
    pub limit: u32,
    pub selected: u64,
    pub base: u64,
    pub add_on: u64,
}

impl CategoryUsage {
    /// Included units still available.
    pub fn remaining(&self) -> u64 {
        u64::from(self.limit).saturating_sub(self.base)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LimitedSelectionStore {
    selections: Vec<LimitedSelection>,
    limits: Vec<CategoryLimit>,
    total_price: MoneyCents,
    total_add_on_price: MoneyCents,
}

impl Default for LimitedSelectionStore {
    fn default() -> Self {
        Self::new(default_category_limits())
    }
}

impl LimitedSelectionStore {
    pub fn new(limits: Vec<CategoryLimit>) -> Self {
        Self {
            selections: Vec::new(),
            limits,
            total_price: MoneyCents::ZERO,
            total_add_on_price: MoneyCents::ZERO,
        }
    }

    pub fn dispatch(&mut self, action: LimitedAction) {
        tracing::debug!(?action, "limited selection dispatch");
        match action {
            LimitedAction::AddItem { item } => match self.find_mut(&item.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
                None => self.selections.push(LimitedSelection::new(item)),
            },
            LimitedAction::RemoveItem { item_id } => {
                self.selections.retain(|s| s.item.id != item_id);
            }
            LimitedAction::UpdateQuantity { item_id, quantity } => {
                if quantity <= 0 {
                    return self.dispatch(LimitedAction::RemoveItem { item_id });
                }
                let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                if let Some(existing) = self.find_mut(&item_id) {
                    existing.quantity = quantity;
                }
            }
            LimitedAction::Clear => self.selections.clear(),
            LimitedAction::SetCategoryLimits(limits) => self.limits = limits,
        }
        self.recompute();
    }

    pub fn add_item(&mut self, item: MenuItem) {
        self.dispatch(LimitedAction::AddItem { item });
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.dispatch(LimitedAction::RemoveItem {
            item_id: item_id.to_string(),
        });
    }

    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) {
        self.dispatch(LimitedAction::UpdateQuantity {
            item_id: item_id.to_string(),
            quantity,
        });
    }

    pub fn clear(&mut self) {
        self.dispatch(LimitedAction::Clear);
    }

    pub fn set_category_limits(&mut self, limits: Vec<CategoryLimit>) {
        self.dispatch(LimitedAction::SetCategoryLimits(limits));
    }

    /// Selections in insertion order.
    pub fn selections(&self) -> &[LimitedSelection] {
        &self.selections
    }

    pub fn limits(&self) -> &[CategoryLimit] {
        &self.limits
    }

    /// Price of the units included in the package allowance.
    pub fn total_price(&self) -> MoneyCents {
        self.total_price
    }

    /// Price of the units beyond the allowance.
    pub fn total_add_on_price(&self) -> MoneyCents {
        self.total_add_on_price
    }

    pub fn grand_total(&self) -> MoneyCents {
        self.total_price + self.total_add_on_price
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn selection(&self, item_id: &str) -> Option<&LimitedSelection> {
        self.selections.iter().find(|s| s.item.id == item_id)
    }

    pub fn category_selections<'a>(
        &'a self,
        category_id: &'a str,
    ) -> impl Iterator<Item = &'a LimitedSelection> {
        self.selections
            .iter()
            .filter(move |s| s.item.category == category_id)
    }

    /// Units selected in a category.
    pub fn category_count(&self, category_id: &str) -> u64 {
        self.category_selections(category_id)
            .map(|s| u64::from(s.quantity))
            .sum()
    }

    /// Configured allowance, 0 when the category has no limit.
    pub fn category_limit(&self, category_id: &str) -> u32 {
        allowance(&self.limits, category_id)
    }

    /// Usage of every configured category followed by every selected category
    /// that has no limit.
    pub fn category_usage(&self) -> Vec<CategoryUsage> {
        let mut usage: Vec<CategoryUsage> = self
            .limits
            .iter()
            .map(|l| CategoryUsage {
                category_id: l.category_id.clone(),
                name: Some(l.name.clone()),
                limit: l.limit,
                selected: 0,
                base: 0,
                add_on: 0,
            })
            .collect();
        let mut index: HashMap<String, usize> = usage
            .iter()
            .enumerate()
            .map(|(i, u)| (u.category_id.clone(), i))
            .collect();

        for selection in &self.selections {
            let category = &selection.item.category;
            let slot = match index.get(category) {
                Some(&slot) => slot,
                None => {
                    usage.push(CategoryUsage {
                        category_id: category.clone(),
                        name: None,
                        limit: 0,
                        selected: 0,
                        base: 0,
                        add_on: 0,
                    });
                    index.insert(category.clone(), usage.len() - 1);
                    usage.len() - 1
                }
            };
            let entry = &mut usage[slot];
            entry.selected += u64::from(selection.quantity);
            entry.base += u64::from(selection.base_quantity);
            entry.add_on += u64::from(selection.add_on_quantity());
        }
        usage
    }

    fn find_mut(&mut self, item_id: &str) -> Option<&mut LimitedSelection> {
        self.selections.iter_mut().find(|s| s.item.id == item_id)
    }

    fn recompute(&mut self) {
        let totals = allocate(&mut self.selections, &self.limits);
        self.total_price = totals.base_price;
        self.total_add_on_price = totals.add_on_price;
    }
}
