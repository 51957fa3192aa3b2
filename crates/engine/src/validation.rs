//! Validation of untyped menu data.
//!
//! Menu JSON is checked entry by entry so a single malformed record produces a
//! precise message instead of rejecting the document with one serde error.

use std::collections::HashSet;

use serde_json::Value;

use crate::{MenuCategory, MenuItem};

/// Outcome of [`validate_menu_data`].
///
/// `categories` and `items` hold every entry that passed validation; orphaned
/// items (unknown category) are already removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogValidation {
    pub errors: Vec<String>,
    pub categories: Vec<MenuCategory>,
    pub items: Vec<MenuItem>,
}

impl CatalogValidation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates a `{"categories": [...], "items": [...]}` document.
pub fn validate_menu_data(data: &Value) -> CatalogValidation {
    let mut report = CatalogValidation::default();

    let Some(object) = data.as_object() else {
        report.errors.push("Menu data is missing or invalid".to_string());
        return report;
    };

    match object.get("categories").and_then(Value::as_array) {
        None => report
            .errors
            .push("Categories array is missing or invalid".to_string()),
        Some(entries) => {
            let mut seen = HashSet::new();
            for (index, entry) in entries.iter().enumerate() {
                match serde_json::from_value::<MenuCategory>(entry.clone()) {
                    Ok(category) if !seen.insert(category.id.clone()) => report
                        .errors
                        .push(format!("Duplicate category id '{}' at index {index}", category.id)),
                    Ok(category) => report.categories.push(category),
                    Err(_) => report
                        .errors
                        .push(format!("Invalid category at index {index}: {entry}")),
                }
            }
        }
    }

    match object.get("items").and_then(Value::as_array) {
        None => report
            .errors
            .push("Items array is missing or invalid".to_string()),
        Some(entries) => {
            let mut seen = HashSet::new();
            for (index, entry) in entries.iter().enumerate() {
                match serde_json::from_value::<MenuItem>(entry.clone()) {
                    Ok(item) if item.price.is_negative() => report
                        .errors
                        .push(format!("Invalid menu item at index {index}: {entry}")),
                    Ok(item) if !seen.insert(item.id.clone()) => report
                        .errors
                        .push(format!("Duplicate item id '{}' at index {index}", item.id)),
                    Ok(item) => report.items.push(item),
                    Err(_) => report
                        .errors
                        .push(format!("Invalid menu item at index {index}: {entry}")),
                }
            }
        }
    }

    let known: HashSet<&str> = report.categories.iter().map(|c| c.id.as_str()).collect();
    let orphaned = report
        .items
        .iter()
        .filter(|item| !known.contains(item.category.as_str()))
        .count();
    if orphaned > 0 {
        report
            .errors
            .push(format!("Found {orphaned} items with invalid categories"));
        report
            .items
            .retain(|item| known.contains(item.category.as_str()));
    }

    if !report.is_valid() {
        tracing::debug!(errors = report.errors.len(), "menu data failed validation");
    }
    report
}
