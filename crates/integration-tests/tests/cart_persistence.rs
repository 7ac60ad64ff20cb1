//! Integration tests for cart persistence through the file store.
//!
//! Each test opens a `FileStore` in its own temp directory, drives a
//! `CartManager` and then reopens the file to check what a later page load
//! would see.

#![allow(clippy::unwrap_used)]

use las_torres_core::{ProductId, ProductInput};
use las_torres_integration_tests::TempDir;
use las_torres_storefront::{CART_KEY, CartManager, FileStore, KeyValueStore};
use rust_decimal::Decimal;

fn croissant() -> ProductInput {
    ProductInput::new("croissant", "Croissant", Decimal::new(150, 2))
}

fn reopen(dir: &TempDir) -> CartManager<FileStore> {
    let mut manager = CartManager::new(FileStore::open(dir.join("storage.json")).unwrap());
    manager.load();
    manager
}

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_cart_survives_reopen() {
    let dir = TempDir::new("lt-persist");
    {
        let mut manager = reopen(&dir);
        manager.add(croissant());
        manager.add(croissant());
        manager.add(ProductInput::new("tarta", "Tarta de Santiago", "12,50€"));
    }

    let manager = reopen(&dir);
    assert_eq!(manager.cart().len(), 2);
    assert_eq!(manager.item_count(), 3);
    assert_eq!(manager.total(), Decimal::new(1550, 2));
    assert_eq!(manager.cart().items()[0].id, ProductId::new("croissant"));
}

#[test]
fn test_clear_then_reload_is_empty() {
    let dir = TempDir::new("lt-persist");
    {
        let mut manager = reopen(&dir);
        manager.add(croissant());
        manager.clear();
    }

    let manager = reopen(&dir);
    assert!(manager.is_empty());
    assert_eq!(manager.total(), Decimal::ZERO);
}

#[test]
fn test_snapshot_format_on_disk() {
    let dir = TempDir::new("lt-persist");
    let mut manager = reopen(&dir);
    manager.add(croissant());

    let store = FileStore::open(dir.join("storage.json")).unwrap();
    let raw = store.get(CART_KEY).unwrap().unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        snapshot,
        serde_json::json!([
            {"id": "croissant", "title": "Croissant", "price": 1.5, "quantity": 1}
        ])
    );
}

#[test]
fn test_other_keys_are_preserved() {
    let dir = TempDir::new("lt-persist");
    {
        let mut store = FileStore::open(dir.join("storage.json")).unwrap();
        store.set("theme", "dark").unwrap();
    }

    let mut manager = reopen(&dir);
    manager.add(croissant());

    let store = FileStore::open(dir.join("storage.json")).unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    assert!(store.get(CART_KEY).unwrap().is_some());
}

// =============================================================================
// Corrupt Data Tests
// =============================================================================

#[test]
fn test_corrupt_snapshot_loads_empty_and_is_replaced() {
    let dir = TempDir::new("lt-persist");
    {
        let mut store = FileStore::open(dir.join("storage.json")).unwrap();
        store.set(CART_KEY, "{not json").unwrap();
    }

    let mut manager = reopen(&dir);
    assert!(manager.is_empty());

    manager.add(croissant());
    let manager = reopen(&dir);
    assert_eq!(manager.item_count(), 1);
}

#[test]
fn test_corrupt_storage_file_starts_empty() {
    let dir = TempDir::new("lt-persist");
    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(dir.join("storage.json"), "garbage").unwrap();

    let mut manager = reopen(&dir);
    assert!(manager.is_empty());

    manager.add(croissant());
    assert_eq!(reopen(&dir).item_count(), 1);
}

#[test]
fn test_legacy_snapshot_is_normalised() {
    let dir = TempDir::new("lt-persist");
    {
        let mut store = FileStore::open(dir.join("storage.json")).unwrap();
        store
            .set(
                CART_KEY,
                r#"[
                    {"id":"pan","title":"Pan","price":"1.20","qty":2},
                    {"id":"pan","title":"Pan","price":1.2,"quantity":1},
                    {"id":"vacio","title":"Vacío","price":3,"quantity":0}
                ]"#,
            )
            .unwrap();
    }

    let manager = reopen(&dir);
    assert_eq!(manager.cart().len(), 1);
    assert_eq!(manager.item_count(), 3);
    assert_eq!(manager.total(), Decimal::new(360, 2));
}

// =============================================================================
// Quota Tests
// =============================================================================

#[test]
fn test_quota_failure_keeps_memory_but_not_disk() {
    let dir = TempDir::new("lt-persist");
    let store = FileStore::open(dir.join("storage.json"))
        .unwrap()
        .with_quota(Some(100));
    let mut manager = CartManager::new(store);
    manager.load();

    manager.add(croissant());
    manager.add(ProductInput::new(
        "roscon",
        "Roscón de Reyes relleno de nata",
        Decimal::new(2200, 2),
    ));

    assert_eq!(manager.cart().len(), 2);
    let reloaded = reopen(&dir);
    assert_eq!(reloaded.cart().len(), 1);
}
