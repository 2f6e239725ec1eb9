use super::*;

#[test]
fn get_missing_key_is_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get("theme"), None);
    assert!(store.is_empty());
}

#[test]
fn set_then_get_returns_last_write() {
    let store = MemoryStore::new();
    store.set("theme", "light").unwrap();
    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    assert_eq!(store.len(), 1);
}

#[test]
fn with_entries_seeds_store() {
    let store = MemoryStore::with_entries([(keys::ONBOARDED, "true"), (keys::THEME, "dark")]);
    assert_eq!(store.get(keys::ONBOARDED).as_deref(), Some("true"));
    assert_eq!(store.get(keys::THEME).as_deref(), Some("dark"));
}

#[test]
fn clear_drops_everything() {
    let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn quota_rejects_oversized_write_and_keeps_old_value() {
    let store = MemoryStore::with_quota(12);
    store.set("theme", "dark").unwrap();
    let err = store.set("theme", "much-too-long").unwrap_err();
    assert_eq!(err, StoreError::QuotaExceeded { key: "theme".to_owned() });
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}

#[test]
fn quota_counts_replacement_not_accumulation() {
    // "k" + "1234" = 5 bytes; rewriting the same key must not double count.
    let store = MemoryStore::with_quota(5);
    store.set("k", "1234").unwrap();
    store.set("k", "abcd").unwrap();
    assert_eq!(store.get("k").as_deref(), Some("abcd"));
}

#[test]
fn quota_error_message_names_key() {
    let err = StoreError::QuotaExceeded { key: "user".to_owned() };
    assert_eq!(err.to_string(), "storage quota exceeded writing user");
}
