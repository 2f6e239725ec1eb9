#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn local_storage_reads_nothing_outside_browser() {
    assert_eq!(LocalStorageStore.get("theme"), None);
}

#[test]
fn local_storage_write_reports_unavailable_outside_browser() {
    let err = LocalStorageStore.set("theme", "dark").unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[test]
fn browser_store_is_writable_on_server() {
    let store = browser_store();
    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}
