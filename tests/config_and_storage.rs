//! Configuration files and file-backed storage

use std::fs;

use neoncart::storage::{FileStorage, Storage};
use neoncart::{CartConfig, CartStore, Error, ProductRef};

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    fs::write(
        &path,
        r#"{
            "storage_key": "neonshop_cart_v2",
            "currency": {"suffix": " EUR", "group_separator": ",", "min_grouping_digits": 1},
            "messages": {"badge_text": "Cart ({count})"}
        }"#,
    )
    .unwrap();

    let config = CartConfig::load_from(&path).unwrap();
    assert_eq!(config.storage_key, "neonshop_cart_v2");
    assert_eq!(config.currency.format(1234.0), "1,234 EUR");
    assert_eq!(config.messages.badge_text, "Cart ({count})");
    assert_eq!(config.messages.remove_label, "Odebrat");
    assert_eq!(config.placeholder_name, "Produkt");
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let bad_json = dir.path().join("bad.json");
    fs::write(&bad_json, "{ nope").unwrap();
    assert!(matches!(CartConfig::load_from(&bad_json), Err(Error::ConfigError(_))));

    let blank_key = dir.path().join("blank.json");
    fs::write(&blank_key, r#"{"storage_key": ""}"#).unwrap();
    assert!(matches!(CartConfig::load_from(&blank_key), Err(Error::ConfigError(_))));

    let missing = dir.path().join("missing.json");
    assert!(matches!(CartConfig::load_from(&missing), Err(Error::ConfigError(_))));
}

#[test]
fn file_store_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let config = CartConfig::default();

    let mut first = CartStore::new(FileStorage::new(&path), &config);
    first.add_to_cart(&ProductRef::new("p1", "Widget", 100.0));
    first.add_to_cart(&ProductRef::new("p2", "Gadget", 49.9));

    let mut second = CartStore::new(FileStorage::new(&path), &config);
    second.set_qty("p2", "3");

    let cart = first.get_cart();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart[1].qty, 3);
    assert_eq!(cart[1].price, 49.9);
}

#[test]
fn separate_keys_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut storage = FileStorage::new(&path);
    storage.set_item("theme", "dark").unwrap();

    let config = CartConfig::default();
    let mut store = CartStore::new(FileStorage::new(&path), &config);
    store.add_to_cart(&ProductRef::new("p1", "Widget", 100.0));
    store.clear();

    assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(
        storage.get_item(neoncart::DEFAULT_STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn corrupt_storage_file_reads_as_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "garbage").unwrap();

    let mut store = CartStore::new(FileStorage::new(&path), &CartConfig::default());
    assert!(store.get_cart().is_empty());
    store.add_to_cart(&ProductRef::new("p1", "Widget", 100.0));
    assert_eq!(store.get_cart().len(), 1);
}
