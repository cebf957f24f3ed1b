use farmq_core::domains::CategorySet;
use farmq_core::Error;

#[test]
fn base_set_has_nine_unique_labels_with_general() {
    let set = CategorySet::builder().build().expect("base set");

    assert_eq!(set.len(), 9, "nine base agricultural domains");
    assert!(set.contains_label("General"), "General is a plain member");
    assert!(set.contains_label("Irrigation"));

    let mut seen = std::collections::HashSet::new();
    for label in set.labels() {
        assert!(seen.insert(label.to_string()), "duplicate label {label}");
    }
}

#[test]
fn override_replaces_phrase_in_place() {
    let set = CategorySet::builder()
        .overrides([("Pests", "aphids, borers, traps")])
        .build()
        .expect("set");

    assert_eq!(set.len(), 9, "override adds no new entry");
    // Pests keeps its original slot (index 3 in the base literal)
    assert_eq!(set.label_at(3), Some("Pests"));
    let pests = set.iter().find(|c| c.label == "Pests").expect("Pests");
    assert_eq!(pests.keywords, "aphids, borers, traps");
}

#[test]
fn override_with_new_label_appends() {
    let set = CategorySet::builder()
        .overrides([("Harvest", "harvest timing, yield, storage")])
        .build()
        .expect("set");

    assert_eq!(set.len(), 10);
    assert_eq!(set.label_at(9), Some("Harvest"), "new labels go last");
}

#[test]
fn later_override_rows_win() {
    let set = CategorySet::builder()
        .overrides([("Soil", "first"), ("Soil", "second")])
        .build()
        .expect("set");

    let soil = set.iter().find(|c| c.label == "Soil").expect("Soil");
    assert_eq!(soil.keywords, "second");
}

#[test]
fn no_override_rows_is_fine() {
    let set = CategorySet::builder()
        .overrides(Vec::<(String, String)>::new())
        .build()
        .expect("base set unchanged");
    assert_eq!(set.len(), 9);
}

#[test]
fn empty_builder_is_a_config_error() {
    use farmq_core::domains::CategorySetBuilder;

    let err = CategorySetBuilder::empty().build().expect_err("empty set");
    assert!(matches!(err, Error::InvalidConfig(_)), "got {err:?}");
}
