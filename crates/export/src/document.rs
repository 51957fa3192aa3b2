//! What goes into an exported menu.
//!
//! A [`MenuDocument`] is a snapshot: it copies what it needs out of the
//! selections and the catalog, so exporting never touches a store.

use chrono::NaiveDate;
use engine::{Catalog, Currency, CustomerInfo, LimitedSelection, MoneyCents, Selection};
use serde::{Deserialize, Serialize};

/// Identity printed in the document header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessInfo {
    pub name: String,
    pub tagline: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Default for BusinessInfo {
    fn default() -> Self {
        Self {
            name: "ARK Events".to_string(),
            tagline: "Professional Catering Services".to_string(),
            phone: "+91 88018 86108".to_string(),
            email: "info@arkevents.com".to_string(),
            address: "Banjara Hills, Hyderabad, Telangana 500034".to_string(),
        }
    }
}

impl BusinessInfo {
    /// `Label: value` lines for the contact fields that are filled in.
    pub fn contact_lines(&self) -> Vec<String> {
        [
            ("Phone", &self.phone),
            ("Email", &self.email),
            ("Address", &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect()
    }
}

pub fn default_terms() -> Vec<String> {
    [
        "All prices are subject to change based on final guest count and menu modifications.",
        "A 50% deposit is required to confirm your booking.",
        "Final guest count must be confirmed 48 hours before the event.",
        "Cancellations made less than 72 hours before the event may incur charges.",
        "We accommodate dietary restrictions with advance notice.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// `<name with whitespace runs as '_'>_Menu_<YYYY-MM-DD>.pdf`.
pub fn filename(business_name: &str, date: NaiveDate) -> String {
    let name = business_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{name}_Menu_{}.pdf", date.format("%Y-%m-%d"))
}

/// One printed item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentLine {
    pub name: String,
    pub description: String,
    pub dietary: Vec<String>,
    pub note: Option<String>,
    pub unit_price: MoneyCents,
    pub quantity: u32,
    /// Units billed beyond the package allowance; 0 for plain selections.
    pub add_on_quantity: u32,
}

impl DocumentLine {
    pub fn line_total(&self) -> MoneyCents {
        self.unit_price.times(self.quantity)
    }

    pub fn is_add_on(&self) -> bool {
        self.add_on_quantity > 0
    }

    fn from_parts(item: &engine::MenuItem, quantity: u32, add_on_quantity: u32) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            dietary: item.dietary.iter().map(|tag| tag.label().to_string()).collect(),
            note: item.note.clone(),
            unit_price: item.price,
            quantity,
            add_on_quantity,
        }
    }
}

/// Items of one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategorySection {
    pub category_id: String,
    pub title: String,
    pub description: String,
    pub lines: Vec<DocumentLine>,
}

/// Included and add-on subtotals of a package export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PackageTotals {
    pub base: MoneyCents,
    pub add_on: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MenuDocument {
    pub business: BusinessInfo,
    pub customer: Option<CustomerInfo>,
    pub sections: Vec<CategorySection>,
    pub package: Option<PackageTotals>,
    pub currency: Currency,
    pub generated_on: NaiveDate,
    pub terms: Vec<String>,
}

impl MenuDocument {
    /// Document for a plain selection list.
    pub fn from_selections(
        business: BusinessInfo,
        selections: &[Selection],
        catalog: &Catalog,
    ) -> Self {
        let lines = selections
            .iter()
            .map(|s| (s.item.category.as_str(), DocumentLine::from_parts(&s.item, s.quantity, 0)));
        Self::new(business, group_sections(lines, catalog), None)
    }

    /// Document for a package selection list, with the base/add-on split.
    pub fn from_limited(
        business: BusinessInfo,
        selections: &[LimitedSelection],
        catalog: &Catalog,
    ) -> Self {
        let package = PackageTotals {
            base: selections
                .iter()
                .map(|s| s.item.price.times(s.base_quantity()))
                .sum(),
            add_on: selections
                .iter()
                .map(|s| s.item.price.times(s.add_on_quantity()))
                .sum(),
        };
        let lines = selections.iter().map(|s| {
            (
                s.item.category.as_str(),
                DocumentLine::from_parts(&s.item, s.quantity, s.add_on_quantity()),
            )
        });
        Self::new(business, group_sections(lines, catalog), Some(package))
    }

    fn new(
        business: BusinessInfo,
        sections: Vec<CategorySection>,
        package: Option<PackageTotals>,
    ) -> Self {
        Self {
            business,
            customer: None,
            sections,
            package,
            currency: Currency::default(),
            generated_on: chrono::Local::now().date_naive(),
            terms: default_terms(),
        }
    }

    #[must_use]
    pub fn customer(mut self, customer: CustomerInfo) -> Self {
        self.customer = (!customer.is_empty()).then_some(customer);
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    #[must_use]
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    #[must_use]
    pub fn terms(mut self, terms: Vec<String>) -> Self {
        self.terms = terms;
        self
    }

    pub fn grand_total(&self) -> MoneyCents {
        self.lines().map(DocumentLine::line_total).sum()
    }

    pub fn item_count(&self) -> u64 {
        self.lines().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DocumentLine> {
        self.sections.iter().flat_map(|s| s.lines.iter())
    }

    pub fn filename(&self) -> String {
        filename(&self.business.name, self.generated_on)
    }
}

/// Groups lines into sections in catalog order. Categories the catalog does
/// not know come last, in order of first appearance, titled by their id.
fn group_sections<'a>(
    lines: impl Iterator<Item = (&'a str, DocumentLine)>,
    catalog: &Catalog,
) -> Vec<CategorySection> {
    let mut sections: Vec<CategorySection> = Vec::new();
    for (category_id, line) in lines {
        match sections.iter_mut().find(|s| s.category_id == category_id) {
            Some(section) => section.lines.push(line),
            None => {
                let (title, description) = catalog
                    .category(category_id)
                    .map_or((category_id.to_string(), String::new()), |c| {
                        (c.name.clone(), c.description.clone())
                    });
                sections.push(CategorySection {
                    category_id: category_id.to_string(),
                    title,
                    description,
                    lines: vec![line],
                });
            }
        }
    }
    // Stable: unknown categories keep their relative order.
    sections.sort_by_key(|s| catalog.category_rank(&s.category_id).unwrap_or(usize::MAX));
    sections
}
