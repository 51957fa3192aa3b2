use engine::{
    Catalog, CategoryLimit, LimitedSelectionStore, MenuCategory, MenuItem, MoneyCents,
    SelectionStore, allocate,
};

fn item(id: &str, category: &str, rupees: i64) -> MenuItem {
    MenuItem::new(id, id, category, MoneyCents::new(rupees * 100))
}

fn catalog_json() -> &'static str {
    r#"{
        "categories": [
            { "id": "veg-starters", "name": "Welcome Starters", "description": "Serve 1hr", "order": 2 },
            { "id": "welcome-drinks", "name": "Welcome Drinks", "description": "Choose any two", "order": 1, "icon": "🥤" }
        ],
        "items": [
            { "id": "fp", "name": "Fruit Punch", "description": "Seasonal fruits", "price": 80, "category": "welcome-drinks", "available": true, "dietaryRestrictions": ["vegetarian"] },
            { "id": "bm", "name": "Badam milk", "description": "Chilled", "price": 90.5, "category": "welcome-drinks", "available": false },
            { "id": "bc", "name": "Baby Corn Amritsari", "description": "Crispy", "price": 150, "category": "veg-starters", "available": true, "specialNotes": "Contains gluten" }
        ]
    }"#
}

#[test]
fn unlimited_store_totals_match_full_recomputation() {
    let mut store = SelectionStore::new();
    store.add_item(item("a", "mains", 250), 2);
    store.add_item(item("b", "mains", 100), 1);
    assert_eq!(store.total_price(), MoneyCents::new(600_00));
    assert_eq!(store.total_items(), 3);

    store.add_item(item("c", "mains", 40), 5);
    store.update_quantity("a", 1);
    store.remove_item("b");
    store.add_item(item("a", "mains", 250), 3);

    let expected_price: MoneyCents = store
        .selections()
        .iter()
        .map(|s| s.item.price.times(s.quantity))
        .sum();
    let expected_items: u64 = store.selections().iter().map(|s| u64::from(s.quantity)).sum();
    assert_eq!(store.total_price(), expected_price);
    assert_eq!(store.total_items(), expected_items);
    assert_eq!(store.quantity("a"), 4);
}

#[test]
fn non_positive_update_equals_remove() {
    let mut updated = SelectionStore::new();
    let mut removed = SelectionStore::new();
    for store in [&mut updated, &mut removed] {
        store.add_item(item("a", "mains", 10), 2);
        store.add_item(item("b", "mains", 20), 1);
    }
    updated.update_quantity("a", 0);
    removed.remove_item("a");
    assert_eq!(updated, removed);
}

#[test]
fn non_positive_update_equals_remove_in_package_store() {
    let limits = vec![CategoryLimit::new("breads", 1, "Breads")];
    let mut updated = LimitedSelectionStore::new(limits.clone());
    let mut removed = LimitedSelectionStore::new(limits);
    for store in [&mut updated, &mut removed] {
        store.add_item(item("naan", "breads", 30));
        store.add_item(item("roti", "breads", 20));
        assert!(store.selection("roti").unwrap().is_add_on());
    }

    updated.update_quantity("naan", -1);
    removed.remove_item("naan");
    assert_eq!(updated, removed);

    // the freed allowance goes to the remaining bread
    let roti = updated.selection("roti").unwrap();
    assert!(!roti.is_add_on());
    assert_eq!(roti.base_quantity(), 1);
    assert_eq!(updated.total_price(), MoneyCents::new(20_00));
    assert_eq!(updated.total_add_on_price(), MoneyCents::ZERO);
}

#[test]
fn clear_resets_both_store_kinds() {
    let mut plain = SelectionStore::new();
    plain.add_item(item("a", "mains", 10), 2);
    plain.clear();
    assert!(plain.selections().is_empty());
    assert_eq!(plain.total_price(), MoneyCents::ZERO);
    assert_eq!(plain.total_items(), 0);

    let mut limited = LimitedSelectionStore::default();
    limited.add_item(item("a", "desserts", 10));
    limited.add_item(item("b", "noodles", 10));
    limited.clear();
    assert!(limited.selections().is_empty());
    assert_eq!(limited.total_price(), MoneyCents::ZERO);
    assert_eq!(limited.total_add_on_price(), MoneyCents::ZERO);
}

#[test]
fn starters_scenario_gives_allowance_to_larger_quantity() {
    let mut store =
        LimitedSelectionStore::new(vec![CategoryLimit::new("starters", 2, "Starters")]);
    store.add_item(item("a", "starters", 100));
    store.add_item(item("b", "starters", 120));
    store.add_item(item("b", "starters", 120));

    let a = store.selection("a").unwrap();
    let b = store.selection("b").unwrap();
    assert_eq!((b.base_quantity(), b.add_on_quantity()), (2, 0));
    assert!(!b.is_add_on());
    assert_eq!((a.base_quantity(), a.add_on_quantity()), (0, 1));
    assert!(a.is_add_on());

    assert_eq!(store.total_price(), MoneyCents::new(240_00));
    assert_eq!(store.total_add_on_price(), MoneyCents::new(100_00));
}

#[test]
fn base_and_add_on_units_follow_min_and_excess_per_category() {
    let limits = vec![
        CategoryLimit::new("soup", 1, "Soup"),
        CategoryLimit::new("breads", 3, "Breads"),
    ];
    let mut store = LimitedSelectionStore::new(limits.clone());
    let quantities = [("s1", "soup", 2), ("s2", "soup", 3), ("b1", "breads", 1), ("b2", "breads", 1)];
    for (id, category, quantity) in quantities {
        store.add_item(item(id, category, 10));
        store.update_quantity(id, quantity);
    }

    for limit in &limits {
        let requested = store.category_count(&limit.category_id);
        let allowance = u64::from(limit.limit);
        let (base, add_on) = store
            .category_selections(&limit.category_id)
            .fold((0u64, 0u64), |(b, a), s| {
                (b + u64::from(s.base_quantity()), a + u64::from(s.add_on_quantity()))
            });
        assert_eq!(base, requested.min(allowance));
        assert_eq!(add_on, requested.saturating_sub(allowance));
    }

    let mut snapshot = store.selections().to_vec();
    let totals = allocate(&mut snapshot, &limits);
    assert_eq!(totals.base_price, store.total_price());
    assert_eq!(totals.add_on_price, store.total_add_on_price());
}

#[test]
fn unconfigured_category_is_all_add_on() {
    let mut store = LimitedSelectionStore::new(Vec::new());
    store.add_item(item("n", "noodles", 90));
    store.add_item(item("n", "noodles", 90));
    assert_eq!(store.total_price(), MoneyCents::ZERO);
    assert_eq!(store.total_add_on_price(), MoneyCents::new(180_00));
}

#[test]
fn catalog_from_json_feeds_the_stores() {
    let catalog = Catalog::from_json(catalog_json()).unwrap();

    let ids: Vec<_> = catalog.categories().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["welcome-drinks", "veg-starters"]);
    assert!(catalog.item("bm").is_none());
    assert_eq!(
        catalog.category("welcome-drinks").and_then(|c| c.icon.as_deref()),
        Some("🥤")
    );

    let mut store = SelectionStore::new();
    store.add_item(catalog.require_item("bc").unwrap().clone(), 2);
    assert_eq!(store.total_price(), MoneyCents::new(300_00));
    assert_eq!(
        store.selections()[0].item.note.as_deref(),
        Some("Contains gluten")
    );
}

#[test]
fn catalog_with_errors_is_rejected() {
    let err = Catalog::from_json(r#"{"categories": [], "items": [{"id": 1}]}"#).unwrap_err();
    assert!(err.to_string().starts_with("Menu data validation failed: Invalid menu item at index 0"));

    let category_only = Catalog::new(vec![MenuCategory::new("soup", "Soup", 1)], Vec::new());
    assert!(category_only.items().is_empty());
}
