use catalog_core::{Catalog, CatalogError, KeyLevel};

fn tools_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.add_item("Tools", "Hand", "Hammer", "claw").unwrap();
    catalog
}

#[test]
fn add_and_get_creates_missing_levels() {
    let mut catalog = Catalog::new();
    catalog
        .add_item("Garden", "Seeds", "Tomato", "Roma")
        .unwrap();

    let record = catalog.get_item("Garden", "Seeds", "Tomato").unwrap();
    assert_eq!(record.name(), "Tomato");
    assert_eq!(record.description(), "Roma");
    assert!(catalog.get_category("Garden").is_some());
    assert!(catalog.get_sub_category("Garden", "Seeds").is_some());
    assert_eq!(catalog.len(), 1);
}

#[test]
fn duplicate_add_is_rejected_and_keeps_existing_record() {
    let mut catalog = tools_catalog();

    let err = catalog
        .add_item("Tools", "Hand", "Hammer", "replacement")
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::DuplicateKey { ref category, ref sub_category, ref name }
            if category == "Tools" && sub_category == "Hand" && name == "Hammer"
    ));
    assert_eq!(
        catalog.get_item("Tools", "Hand", "Hammer").unwrap().description(),
        "claw"
    );
    assert_eq!(catalog.len(), 1);
}

#[test]
fn same_name_in_other_sub_category_is_allowed() {
    let mut catalog = tools_catalog();
    catalog
        .add_item("Tools", "Power", "Hammer", "rotary")
        .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.sub_category_names("Tools").collect::<Vec<_>>(),
        vec!["Hand", "Power"]
    );
}

#[test]
fn add_strips_one_layer_of_wrapping_quotes() {
    let mut catalog = Catalog::new();
    catalog.add_item("A", "B", "one", "\"quoted\"").unwrap();
    catalog.add_item("A", "B", "two", "\"\"double\"\"").unwrap();
    catalog.add_item("A", "B", "three", "\"").unwrap();

    assert_eq!(catalog.get_item("A", "B", "one").unwrap().description(), "quoted");
    assert_eq!(
        catalog.get_item("A", "B", "two").unwrap().description(),
        "\"double\""
    );
    assert_eq!(catalog.get_item("A", "B", "three").unwrap().description(), "\"");
}

#[test]
fn blank_keys_are_rejected_without_creating_levels() {
    let mut catalog = Catalog::new();

    let err = catalog.add_item(" ", "Hand", "Hammer", "").unwrap_err();
    assert!(matches!(err, CatalogError::EmptyKey(KeyLevel::Category)));
    let err = catalog.add_item("Tools", "", "Hammer", "").unwrap_err();
    assert!(matches!(err, CatalogError::EmptyKey(KeyLevel::SubCategory)));
    let err = catalog.add_item("Tools", "Hand", "\t", "").unwrap_err();
    assert!(matches!(err, CatalogError::EmptyKey(KeyLevel::Record)));

    assert!(catalog.is_empty());
}

#[test]
fn lookups_on_absent_paths_return_none() {
    let catalog = tools_catalog();

    assert!(catalog.has_item("Tools", "Hand", "Hammer"));
    assert!(!catalog.has_item("Tools", "Hand", "Saw"));
    assert!(!catalog.has_item("Tools", "Power", "Hammer"));
    assert!(!catalog.has_item("Garden", "Hand", "Hammer"));
    assert!(catalog.get_item("Garden", "Seeds", "Tomato").is_none());
    assert_eq!(catalog.sub_category_names("Garden").count(), 0);
    assert_eq!(catalog.record_names("Tools", "Power").count(), 0);
}

#[test]
fn deleting_last_record_cascades_to_empty_catalog() {
    let mut catalog = tools_catalog();

    let removed = catalog.delete_item("Tools", "Hand", "Hammer").unwrap();
    assert_eq!(removed.name(), "Hammer");
    assert!(catalog.is_empty());
    assert!(catalog.get_category("Tools").is_none());
    assert_eq!(catalog.category_names().count(), 0);
}

#[test]
fn deleting_last_record_of_one_sub_category_keeps_siblings() {
    let mut catalog = tools_catalog();
    catalog.add_item("Tools", "Power", "Drill", "cordless").unwrap();
    catalog.add_item("Tools", "Hand", "Saw", "crosscut").unwrap();

    catalog.delete_item("Tools", "Power", "Drill");
    assert!(catalog.get_sub_category("Tools", "Power").is_none());
    assert_eq!(
        catalog.record_names("Tools", "Hand").collect::<Vec<_>>(),
        vec!["Hammer", "Saw"]
    );

    catalog.delete_item("Tools", "Hand", "Saw");
    assert!(catalog.get_sub_category("Tools", "Hand").is_some());
}

#[test]
fn delete_on_absent_path_is_a_no_op() {
    let mut catalog = tools_catalog();

    assert!(catalog.delete_item("Tools", "Hand", "Saw").is_none());
    assert!(catalog.delete_item("Tools", "Power", "Hammer").is_none());
    assert!(catalog.delete_item("Garden", "Hand", "Hammer").is_none());
    assert_eq!(catalog.len(), 1);
}

#[test]
fn set_description_updates_in_place() {
    let mut catalog = tools_catalog();

    catalog
        .set_description("Tools", "Hand", "Hammer", "framing, 20oz")
        .unwrap();
    assert_eq!(
        catalog.get_item("Tools", "Hand", "Hammer").unwrap().description(),
        "framing, 20oz"
    );

    let err = catalog
        .set_description("Tools", "Hand", "Saw", "x")
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[test]
fn set_description_strips_wrapping_quotes_like_add() {
    let mut catalog = tools_catalog();

    catalog
        .set_description("Tools", "Hand", "Hammer", "\"Roma, heirloom\"")
        .unwrap();
    assert_eq!(
        catalog.get_item("Tools", "Hand", "Hammer").unwrap().description(),
        "Roma, heirloom"
    );
}

// Rename re-keys: the old key is freed and the new key is addressable.
// A bare field update would leave the record reachable only under its old
// name, so catalogs expose no mutable record access.
#[test]
fn rename_rekeys_record_and_frees_old_name() {
    let mut catalog = tools_catalog();

    catalog
        .rename_item("Tools", "Hand", "Hammer", "Mallet")
        .unwrap();
    assert!(!catalog.has_item("Tools", "Hand", "Hammer"));
    let record = catalog.get_item("Tools", "Hand", "Mallet").unwrap();
    assert_eq!(record.name(), "Mallet");
    assert_eq!(record.description(), "claw");

    catalog.add_item("Tools", "Hand", "Hammer", "new").unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn rename_rejects_taken_blank_and_missing_names() {
    let mut catalog = tools_catalog();
    catalog.add_item("Tools", "Hand", "Saw", "crosscut").unwrap();

    let err = catalog
        .rename_item("Tools", "Hand", "Hammer", "Saw")
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateKey { ref name, .. } if name == "Saw"));

    let err = catalog
        .rename_item("Tools", "Hand", "Hammer", "  ")
        .unwrap_err();
    assert!(matches!(err, CatalogError::EmptyKey(KeyLevel::Record)));

    let err = catalog
        .rename_item("Tools", "Hand", "Chisel", "Gouge")
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));

    catalog
        .rename_item("Tools", "Hand", "Hammer", "Hammer")
        .unwrap();
    assert_eq!(
        catalog.record_names("Tools", "Hand").collect::<Vec<_>>(),
        vec!["Hammer", "Saw"]
    );
}

#[test]
fn entries_iterate_depth_first_in_key_order() {
    let mut catalog = Catalog::new();
    catalog.add_item("Tools", "Power", "Drill", "").unwrap();
    catalog.add_item("Garden", "Seeds", "Tomato", "").unwrap();
    catalog.add_item("Tools", "Hand", "Saw", "").unwrap();
    catalog.add_item("Tools", "Hand", "Hammer", "").unwrap();

    let paths: Vec<String> = catalog
        .entries()
        .map(|(category, sub_category, record)| {
            format!("{category}/{sub_category}/{}", record.name())
        })
        .collect();
    assert_eq!(
        paths,
        vec![
            "Garden/Seeds/Tomato",
            "Tools/Hand/Hammer",
            "Tools/Hand/Saw",
            "Tools/Power/Drill",
        ]
    );
    assert_eq!(catalog.get_category("Tools").unwrap().record_count(), 3);
}
