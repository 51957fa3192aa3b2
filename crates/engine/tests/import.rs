use std::{fs::File, io::BufReader, path::PathBuf};

use engine::{DietaryTag, MoneyCents, SheetFormat, import_csv, import_xlsx};

fn data(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(file)
}

#[test]
fn workbook_first_sheet_becomes_a_catalog() {
    let path = data("menu.xlsx");
    assert_eq!(SheetFormat::from_path(&path), Some(SheetFormat::Xlsx));

    let file = BufReader::new(File::open(&path).unwrap());
    let catalog = import_xlsx(file, "butta").unwrap();
    let items = catalog.items();

    // the blank row is skipped and the notes sheet is never read
    assert_eq!(items.len(), 7);
    assert!(items.iter().all(|i| !i.name.starts_with("Prices")));

    let punch = catalog.item("butta-veg-1").unwrap();
    assert_eq!(punch.category, "welcome-drinks");
    assert_eq!(punch.price, MoneyCents::new(80_00));
    assert_eq!(punch.description, "Seasonal fruits with soda");
    assert_eq!(punch.dietary, [DietaryTag::Vegetarian]);

    let corn = catalog.item("butta-veg-2").unwrap();
    assert_eq!(corn.category, "veg-mains");
    assert_eq!(corn.description, "Baby Corn Amritsari");

    let fish = catalog.item("butta-nonveg-3").unwrap();
    assert_eq!(fish.category, "nonveg-starters");
    assert_eq!(fish.price, MoneyCents::new(250_50));
    assert!(fish.dietary.is_empty());

    assert_eq!(catalog.item("butta-nonveg-4").unwrap().price, MoneyCents::new(1_250_00));
    assert_eq!(catalog.item("butta-nonveg-5").unwrap().category, "rice-biryanis");
    assert_eq!(catalog.item("butta-veg-6").unwrap().category, "breads");

    let ice_cream = catalog.item("butta-veg-7").unwrap();
    assert_eq!(ice_cream.category, "ice-cream");
    assert_eq!(ice_cream.price, MoneyCents::ZERO);
}

#[test]
fn csv_export_of_the_sheet_imports_every_row() {
    let path = data("menu.csv");
    assert_eq!(SheetFormat::from_path(&path), Some(SheetFormat::Csv));

    let catalog = import_csv(File::open(&path).unwrap(), "item").unwrap();
    assert_eq!(catalog.items().len(), 13);
    assert_eq!(catalog.item("item-nonveg-5").unwrap().name, "Chicken 65");
    assert_eq!(
        catalog.item("item-nonveg-5").unwrap().category,
        "nonveg-starters"
    );
}
