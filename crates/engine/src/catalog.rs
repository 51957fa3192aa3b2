//! Menu catalog: items, categories and the validated [`Catalog`] handed to
//! the selection stores.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, ResultEngine, validation::CatalogValidation};

/// Dietary marker attached to a menu item.
///
/// Known tags carry a human label; anything else is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
    LowSodium,
    LowCarb,
    Other(String),
}

impl DietaryTag {
    /// Key used in menu data (`gluten-free`).
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten-free",
            Self::DairyFree => "dairy-free",
            Self::NutFree => "nut-free",
            Self::LowSodium => "low-sodium",
            Self::LowCarb => "low-carb",
            Self::Other(raw) => raw,
        }
    }

    /// Label shown to customers (`Gluten Free`).
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten Free",
            Self::DairyFree => "Dairy Free",
            Self::NutFree => "Nut Free",
            Self::LowSodium => "Low Sodium",
            Self::LowCarb => "Low Carb",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for DietaryTag {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "vegetarian" => Self::Vegetarian,
            "vegan" => Self::Vegan,
            "gluten-free" => Self::GlutenFree,
            "dairy-free" => Self::DairyFree,
            "nut-free" => Self::NutFree,
            "low-sodium" => Self::LowSodium,
            "low-carb" => Self::LowCarb,
            _ => Self::Other(value),
        }
    }
}

impl From<DietaryTag> for String {
    fn from(value: DietaryTag) -> Self {
        value.key().to_string()
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A dish or drink that can be selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "crate::money::major_units")]
    pub price: MoneyCents,
    pub category: String,
    pub available: bool,
    #[serde(default, rename = "dietaryRestrictions", skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<DietaryTag>,
    #[serde(default, rename = "specialNotes", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: MoneyCents,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category: category.into(),
            available: true,
            dietary: Vec::new(),
            note: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn dietary(mut self, tag: DietaryTag) -> Self {
        self.dietary.push(tag);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// A menu section such as "Welcome Drinks".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Sort key; lower comes first.
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl MenuCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            order,
            icon: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Validated menu data.
///
/// Categories are sorted by [`MenuCategory::order`], only available items are
/// kept and every item references a known category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<MenuCategory>,
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Builds a catalog from already-typed data, dropping unavailable items and
    /// items whose category is unknown.
    pub fn new(mut categories: Vec<MenuCategory>, items: Vec<MenuItem>) -> Self {
        categories.sort_by_key(|category| category.order);
        let items = items
            .into_iter()
            .filter(|item| item.available)
            .filter(|item| categories.iter().any(|c| c.id == item.category))
            .collect();
        Self { categories, items }
    }

    /// Parses and validates menu JSON.
    ///
    /// Any validation error rejects the whole catalog; use
    /// [`validate_menu_data`](crate::validate_menu_data) to inspect the report.
    pub fn from_json(raw: &str) -> ResultEngine<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::try_from(crate::validate_menu_data(&value))
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn category(&self, category_id: &str) -> Option<&MenuCategory> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Looks an item up, failing with [`EngineError::KeyNotFound`].
    pub fn require_item(&self, item_id: &str) -> ResultEngine<&MenuItem> {
        self.item(item_id)
            .ok_or_else(|| EngineError::KeyNotFound(item_id.to_string()))
    }

    pub fn items_in(&self, category_id: &str) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |i| i.category == category_id)
    }

    /// Position of a category in display order, `None` when unknown.
    pub fn category_rank(&self, category_id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == category_id)
    }
}

impl TryFrom<CatalogValidation> for Catalog {
    type Error = EngineError;

    fn try_from(report: CatalogValidation) -> Result<Self, Self::Error> {
        if !report.is_valid() {
            return Err(EngineError::InvalidCatalog(report.errors));
        }
        Ok(Self::new(report.categories, report.items))
    }
}
