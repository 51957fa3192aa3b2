//! Spreadsheet import.
//!
//! Caterers keep their dishes in a workbook (`.xlsx`, first worksheet) or a
//! CSV export of it, with the columns `name,category,type,price,description`.
//! `type` is `veg` or `nonveg`; when `category` is blank it is guessed from
//! keywords in the dish name. Prices use `.` for decimals and may carry
//! thousands separators (`1,250.50`).

use std::{
    io::{Read, Seek},
    path::Path,
};

use calamine::{Data, Reader, Xlsx};
use serde::Deserialize;

use crate::{
    Catalog, DietaryTag, EngineError, MenuCategory, MenuItem, MoneyCents, ResultEngine,
    util::{normalize_key, slugify, title_from_slug},
};

/// Categories a sheet import starts from, in display order.
pub fn standard_categories() -> Vec<MenuCategory> {
    [
        ("welcome-drinks", "Welcome Drinks", "Choose any two - Serves only for 1hr"),
        ("veg-starters", "Welcome Starters", "Vegetarian starters - Serve 1hr"),
        ("nonveg-starters", "Non-Veg Starters", "Non-vegetarian starters"),
        ("salads", "Salads", "Fresh salads"),
        ("soup", "Soup", "Choose any one"),
        ("veg-mains", "Main Course", "Vegetarian main dishes"),
        ("nonveg-mains", "Main Course", "Non-vegetarian main dishes"),
        ("rice-biryanis", "Rice & Biryanis", "Rice, pulao and biryanis"),
        ("noodles", "Noodles", "Choose any one"),
        ("breads", "Indian Breads", "Choose any two"),
        ("desserts", "Desserts", "Choose any two"),
        ("ice-cream", "Ice Cream", "Sweet treats"),
        ("beverages", "Beverages", "Drinks served with the meal"),
    ]
    .into_iter()
    .zip(1u32..)
    .map(|((id, name, description), order)| {
        MenuCategory::new(id, name, order).description(description)
    })
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Diet {
    Veg,
    NonVeg,
}

impl Diet {
    fn parse(raw: &str) -> Option<Self> {
        match normalize_key(raw).replace([' ', '-', '_'], "").as_str() {
            "veg" | "vegetarian" => Some(Self::Veg),
            "nonveg" | "nonvegetarian" => Some(Self::NonVeg),
            _ => None,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Veg => "veg",
            Self::NonVeg => "nonveg",
        }
    }
}

/// File formats [`import_csv`] and [`import_xlsx`] read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Xlsx,
}

impl SheetFormat {
    /// Picks the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SheetRow {
    name: String,
    category: Option<String>,
    #[serde(rename = "type")]
    diet: String,
    price: Option<String>,
    description: Option<String>,
}

/// Guesses the category of a dish from its name.
pub fn guess_category(name: &str, vegetarian: bool) -> &'static str {
    let name = normalize_key(name);
    let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

    if has(&[
        "juice", "lassi", "water", "drink", "shake", "cooler", "lime", "buttermilk",
        "aam panna", "jaljeera", "coconut",
    ]) {
        return "welcome-drinks";
    }
    if has(&[
        "starter", "appetizer", "tikka", "kebab", "fry", "65", "manchurian", "pakoda", "cutlet",
    ]) {
        return if vegetarian {
            "veg-starters"
        } else {
            "nonveg-starters"
        };
    }
    if has(&["biryani", "rice", "pulao"]) {
        return "rice-biryanis";
    }
    if has(&["naan", "roti", "bread", "paratha", "kulcha"]) {
        return "breads";
    }
    if has(&[
        "sweet", "dessert", "halwa", "kheer", "laddu", "barfi", "meetha", "payasam",
    ]) {
        return "desserts";
    }
    if vegetarian { "veg-mains" } else { "nonveg-mains" }
}

/// Reads a CSV export of the sheet and builds a catalog.
///
/// Item ids are `<prefix>-<veg|nonveg>-<row>` with 1-based data rows. A
/// category id that is not one of [`standard_categories`] gets its own
/// category, titled from the id and ordered after the standard ones.
pub fn import_csv<R: Read>(reader: R, id_prefix: &str) -> ResultEngine<Catalog> {
    let mut sheet = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let rows = sheet
        .deserialize::<SheetRow>()
        .map(|row| row.map_err(EngineError::from));
    build_catalog(rows, id_prefix)
}

/// Reads the first worksheet of an `.xlsx` workbook, the same way
/// [`import_csv`] reads a CSV export. The first row holds the column names;
/// blank rows are skipped.
pub fn import_xlsx<R: Read + Seek>(reader: R, id_prefix: &str) -> ResultEngine<Catalog> {
    let mut workbook: Xlsx<R> = Xlsx::new(reader)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EngineError::InvalidRecord("workbook has no worksheet".to_string()))??;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| normalize_key(&cell_text(cell))).collect())
        .unwrap_or_default();
    let column = |name: &str| header.iter().position(|h| h == name);
    let required = |name: &str| {
        column(name)
            .ok_or_else(|| EngineError::InvalidRecord(format!("missing column '{name}'")))
    };
    let name = required("name")?;
    let diet = required("type")?;
    let (category, price, description) =
        (column("category"), column("price"), column("description"));

    let value = |row: &[Data], index: Option<usize>| {
        index
            .and_then(|i| row.get(i))
            .map(cell_text)
            .filter(|text| !text.is_empty())
    };
    let sheet_rows = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            Ok(SheetRow {
                name: value(row, Some(name)).unwrap_or_default(),
                category: value(row, category),
                diet: value(row, Some(diet)).unwrap_or_default(),
                price: value(row, price),
                description: value(row, description),
            })
        });
    build_catalog(sheet_rows, id_prefix)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}

fn parse_price(raw: &str) -> ResultEngine<MoneyCents> {
    raw.replace(',', "").parse()
}

fn build_catalog(
    rows: impl Iterator<Item = ResultEngine<SheetRow>>,
    id_prefix: &str,
) -> ResultEngine<Catalog> {
    let mut categories = standard_categories();
    let mut items = Vec::new();

    for (index, row) in rows.enumerate() {
        let row = row?;
        let line = index + 1;

        if row.name.is_empty() {
            return Err(EngineError::InvalidRecord(format!("row {line}: missing name")));
        }
        let diet = Diet::parse(&row.diet).ok_or_else(|| {
            EngineError::InvalidRecord(format!("row {line}: unknown type '{}'", row.diet))
        })?;
        let price = match row.price.as_deref() {
            None | Some("") => MoneyCents::ZERO,
            Some(raw) => parse_price(raw).map_err(|err| {
                EngineError::InvalidRecord(format!("row {line}: {err}"))
            })?,
        };
        if price.is_negative() {
            return Err(EngineError::InvalidRecord(format!(
                "row {line}: price must not be negative"
            )));
        }

        let category = match row.category.as_deref().map(slugify) {
            Some(slug) if !slug.is_empty() => slug,
            _ => guess_category(&row.name, diet == Diet::Veg).to_string(),
        };
        if !categories.iter().any(|c| c.id == category) {
            let order = categories.len() as u32 + 1;
            categories.push(MenuCategory::new(
                category.clone(),
                title_from_slug(&category),
                order,
            ));
        }

        let description = row
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| row.name.clone());
        let mut item = MenuItem::new(
            format!("{id_prefix}-{}-{line}", diet.key()),
            row.name,
            category,
            price,
        )
        .description(description);
        if diet == Diet::Veg {
            item = item.dietary(DietaryTag::Vegetarian);
        }
        items.push(item);
    }

    tracing::info!(items = items.len(), "imported sheet");
    Ok(Catalog::new(categories, items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_categories_from_keywords() {
        assert_eq!(guess_category("Fruit Punch Cooler", true), "welcome-drinks");
        assert_eq!(guess_category("Chicken 65", false), "nonveg-starters");
        assert_eq!(guess_category("Baby Corn Manchurian", true), "veg-starters");
        assert_eq!(guess_category("Hyderabadi Dum Biryani", false), "rice-biryanis");
        assert_eq!(guess_category("Garlic Naan", true), "breads");
        assert_eq!(guess_category("Double ka Meetha", true), "desserts");
        assert_eq!(guess_category("Mutton Masala", false), "nonveg-mains");
        assert_eq!(guess_category("Paneer Butter Masala", true), "veg-mains");
    }

    #[test]
    fn imports_rows_with_ids_tags_and_prices() {
        let sheet = "\
name,category,type,price,description
Fruit Punch,welcome-drinks,veg,80,
Apollo fish fry,,nonveg,250.50,Crispy fried fish
Bitterscotch,Ice Cream,veg,,
";
        let catalog = import_csv(sheet.as_bytes(), "butta").unwrap();
        let items = catalog.items();
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].id, "butta-veg-1");
        assert_eq!(items[0].description, "Fruit Punch");
        assert_eq!(items[0].dietary, [DietaryTag::Vegetarian]);

        assert_eq!(items[1].id, "butta-nonveg-2");
        assert_eq!(items[1].category, "nonveg-starters");
        assert_eq!(items[1].price, MoneyCents::new(25050));
        assert!(items[1].dietary.is_empty());

        assert_eq!(items[2].category, "ice-cream");
        assert_eq!(items[2].price, MoneyCents::ZERO);
    }

    #[test]
    fn unknown_category_gets_its_own_section() {
        let sheet = "name,category,type,price,description\nPani Puri,Chaat Counter,veg,40,\n";
        let catalog = import_csv(sheet.as_bytes(), "live").unwrap();
        let category = catalog.category("chaat-counter").unwrap();
        assert_eq!(category.name, "Chaat Counter");
        assert_eq!(category.order, standard_categories().len() as u32 + 1);
    }

    #[test]
    fn rejects_unknown_type() {
        let sheet = "name,category,type,price,description\nTea,,hot,10,\n";
        assert_eq!(
            import_csv(sheet.as_bytes(), "x").unwrap_err(),
            EngineError::InvalidRecord("row 1: unknown type 'hot'".to_string())
        );
    }

    #[test]
    fn prices_may_use_thousands_separators() {
        let sheet = "name,category,type,price,description\n\
Mutton Biryani Handi,,nonveg,\"1,250\",\n\
Live Dosa Counter,,veg,\"12,500.50\",\n";
        let catalog = import_csv(sheet.as_bytes(), "x").unwrap();
        assert_eq!(catalog.items()[0].price, MoneyCents::new(1_250_00));
        assert_eq!(catalog.items()[1].price, MoneyCents::new(12_500_50));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SheetFormat::from_path(Path::new("menu.CSV")), Some(SheetFormat::Csv));
        assert_eq!(SheetFormat::from_path(Path::new("a/b.xlsx")), Some(SheetFormat::Xlsx));
        assert_eq!(SheetFormat::from_path(Path::new("menu.ods")), None);
        assert_eq!(SheetFormat::from_path(Path::new("menu")), None);
    }
}
