use larder_core::{CanRegistry, DateRegistry, GoodRegistry, JsonStore, StoreError};
use std::collections::{HashMap, HashSet};

fn registries() -> (GoodRegistry, DateRegistry, CanRegistry) {
    (GoodRegistry::new(), DateRegistry::new(), CanRegistry::new())
}

fn populate(goods: &mut GoodRegistry, dates: &mut DateRegistry, cans: &mut CanRegistry) {
    cans.add(goods, dates, "milk", 2_460_100, None).unwrap();
    cans.add(goods, dates, "Beans", 2_460_200, None).unwrap();
    cans.add(goods, dates, "milk", 2_460_200, Some(7)).unwrap();
}

#[test]
fn loading_a_missing_file_bootstraps_a_fresh_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let store = JsonStore::new(&path);
    let (mut goods, mut dates, mut cans) = registries();

    store.load(&mut goods, &mut dates, &mut cans).unwrap();

    assert_eq!(goods.row_count(), 0);
    assert_eq!(dates.row_count(), 0);
    assert_eq!(cans.row_count(), 0);
    assert!(path.exists());

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["goods"], serde_json::json!({}));
    assert_eq!(value["dates"], serde_json::json!({}));
    assert_eq!(value["cans"], serde_json::json!({}));
}

#[test]
fn save_then_load_round_trips_every_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("inventory.json"));
    let (mut goods, mut dates, mut cans) = registries();
    populate(&mut goods, &mut dates, &mut cans);

    store.save(&goods, &dates, &cans).unwrap();

    let (mut goods2, mut dates2, mut cans2) = registries();
    store.load(&mut goods2, &mut dates2, &mut cans2).unwrap();

    let names: HashSet<String> = (0..goods2.row_count())
        .filter_map(|row| goods2.good_at(row))
        .map(|(_, name)| name.to_string())
        .collect();
    assert_eq!(
        names,
        HashSet::from(["milk".to_string(), "Beans".to_string()])
    );
    for row in 0..goods.row_count() {
        let (id, name) = goods.good_at(row).unwrap();
        assert_eq!(goods2.name_of(id), Some(name));
    }
    for row in 0..dates.row_count() {
        let (id, value) = dates.date_at(row).unwrap();
        assert_eq!(dates2.value_of(id), Some(value));
    }

    let associations = |cans: &CanRegistry| -> HashMap<u32, (u32, u32)> {
        (0..cans.row_count())
            .filter_map(|row| cans.can_at(row))
            .map(|id| {
                (
                    id,
                    (cans.good_id_of(id).unwrap(), cans.date_id_of(id).unwrap()),
                )
            })
            .collect()
    };
    assert_eq!(associations(&cans), associations(&cans2));
}

#[test]
fn ids_and_day_ordinals_travel_as_decimal_strings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let store = JsonStore::new(&path);
    let (mut goods, mut dates, mut cans) = registries();
    cans.add(&mut goods, &mut dates, "milk", 2_460_100, None).unwrap();

    store.save(&goods, &dates, &cans).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["goods"]["1"], serde_json::json!("milk"));
    assert_eq!(value["dates"]["1"], serde_json::json!("2460100"));
    assert_eq!(value["cans"]["1"], serde_json::json!(["1", "1"]));
}

#[test]
fn malformed_documents_fail_hard_and_populate_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    std::fs::write(&path, "this is not json").unwrap();

    let store = JsonStore::new(&path);
    let (mut goods, mut dates, mut cans) = registries();
    goods.add("existing").unwrap();

    let err = store.load(&mut goods, &mut dates, &mut cans).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
    // The pre-existing state was not cleared.
    assert!(goods.contains_name("existing"));
}

#[test]
fn a_top_level_array_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    std::fs::write(&path, "[]").unwrap();

    let store = JsonStore::new(&path);
    let (mut goods, mut dates, mut cans) = registries();
    let err = store.load(&mut goods, &mut dates, &mut cans).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn unparseable_records_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    std::fs::write(
        &path,
        r#"{
            "goods": { "1": "milk", "bogus": "beans", "2": 42 },
            "dates": { "1": "2460100", "2": "not a number" },
            "cans": { "1": ["1", "1"], "2": ["9", "1"], "3": "1,1" }
        }"#,
    )
    .unwrap();

    let store = JsonStore::new(&path);
    let (mut goods, mut dates, mut cans) = registries();
    store.load(&mut goods, &mut dates, &mut cans).unwrap();

    // Only the well-formed, resolvable records made it in.
    assert_eq!(goods.row_count(), 1);
    assert_eq!(dates.row_count(), 1);
    assert_eq!(cans.row_count(), 1);
    assert!(cans.contains_id(1));
}

#[test]
fn load_replaces_previous_registry_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("inventory.json"));
    let (mut goods, mut dates, mut cans) = registries();
    cans.add(&mut goods, &mut dates, "milk", 2_460_100, None).unwrap();
    store.save(&goods, &dates, &cans).unwrap();

    // Mutate in memory, then load the older snapshot back.
    cans.add(&mut goods, &mut dates, "soup", 2_460_300, None).unwrap();
    store.load(&mut goods, &mut dates, &mut cans).unwrap();

    assert_eq!(goods.row_count(), 1);
    assert!(goods.contains_name("milk"));
    assert!(!goods.contains_name("soup"));
    assert_eq!(cans.row_count(), 1);
}

#[test]
fn save_overwrites_the_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let store = JsonStore::new(&path);
    let (mut goods, mut dates, mut cans) = registries();

    cans.add(&mut goods, &mut dates, "milk", 2_460_100, None).unwrap();
    store.save(&goods, &dates, &cans).unwrap();

    cans.add(&mut goods, &mut dates, "beans", 2_460_200, None).unwrap();
    store.save(&goods, &dates, &cans).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["goods"].as_object().unwrap().len(), 2);
    assert_eq!(value["cans"].as_object().unwrap().len(), 2);
}

#[test]
fn an_empty_path_is_rejected() {
    let store = JsonStore::new("");
    let (mut goods, mut dates, mut cans) = registries();

    assert!(matches!(
        store.load(&mut goods, &mut dates, &mut cans).unwrap_err(),
        StoreError::EmptyPath
    ));
    assert!(matches!(
        store.save(&goods, &dates, &cans).unwrap_err(),
        StoreError::EmptyPath
    ));
}
