use super::*;
use crate::net::types::UserType;
use crate::state::storage::MemoryStorage;
use crate::test_helpers;

fn memory() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::new())
}

// =============================================================================
// load
// =============================================================================

#[test]
fn empty_storage_loads_anonymous_session() {
    let store = SessionStore::load(memory(), StorageNamespace::ADMIN);
    assert!(!store.is_authenticated());
    assert_eq!(store.snapshot(), Session::default());
}

#[test]
fn set_then_reload_round_trips_user() {
    let storage = memory();
    let user = test_helpers::user(UserType::Admin);
    let store = SessionStore::load(storage.clone(), StorageNamespace::ADMIN);
    store.set("tok-1", &user).unwrap();

    let reloaded = SessionStore::load(storage, StorageNamespace::ADMIN);
    assert!(reloaded.is_authenticated());
    assert_eq!(reloaded.token().as_deref(), Some("tok-1"));
    assert_eq!(reloaded.user(), Some(user));
}

#[test]
fn reload_picks_up_external_changes() {
    let storage = memory();
    let store = SessionStore::load(storage.clone(), StorageNamespace::WEB);
    let user = test_helpers::user(UserType::Customer);
    storage.set("access_token", "tok-2").unwrap();
    storage.set("user", &serde_json::to_string(&user).unwrap()).unwrap();
    assert!(!store.is_authenticated());

    store.reload();
    assert!(store.is_authenticated());
}

#[test]
fn malformed_user_json_loads_as_logged_out() {
    let storage = memory();
    storage.set("admin_token", "tok").unwrap();
    storage.set("admin_user", "{\"id\": 1, oops").unwrap();
    let store = SessionStore::load(storage, StorageNamespace::ADMIN);
    assert!(!store.is_authenticated());
    assert_eq!(store.token(), None);
}

#[test]
fn token_without_user_is_not_a_session() {
    let storage = memory();
    storage.set("admin_token", "tok").unwrap();
    let store = SessionStore::load(storage, StorageNamespace::ADMIN);
    assert!(!store.is_authenticated());
    assert_eq!(store.snapshot(), Session::default());
}

#[test]
fn empty_token_is_not_a_session() {
    let storage = memory();
    let user = test_helpers::user(UserType::Admin);
    storage.set("admin_token", "").unwrap();
    storage.set("admin_user", &serde_json::to_string(&user).unwrap()).unwrap();
    assert!(!SessionStore::load(storage, StorageNamespace::ADMIN).is_authenticated());
}

#[test]
fn namespaces_do_not_see_each_other() {
    let storage = memory();
    let admin = SessionStore::load(storage.clone(), StorageNamespace::ADMIN);
    admin.set("admin-tok", &test_helpers::user(UserType::Admin)).unwrap();

    let web = SessionStore::load(storage, StorageNamespace::WEB);
    assert!(!web.is_authenticated());
}

// =============================================================================
// set / clear
// =============================================================================

#[test]
fn set_persists_under_namespace_keys() {
    let storage = memory();
    let store = SessionStore::load(storage.clone(), StorageNamespace::ADMIN);
    store.set("tok-9", &test_helpers::user(UserType::Admin)).unwrap();
    assert_eq!(storage.get("admin_token").as_deref(), Some("tok-9"));
    assert!(storage.get("admin_user").unwrap().contains("\"user_type\":\"admin\""));
}

#[test]
fn clear_removes_memory_and_storage() {
    let storage = memory();
    let store = SessionStore::load(storage.clone(), StorageNamespace::ADMIN);
    store.set("tok", &test_helpers::user(UserType::Admin)).unwrap();

    store.clear().unwrap();
    assert!(!store.is_authenticated());
    assert_eq!(storage.get("admin_token"), None);
    assert_eq!(storage.get("admin_user"), None);
    assert!(storage.is_empty());
}

#[test]
fn clear_on_empty_session_is_harmless() {
    let store = SessionStore::load(memory(), StorageNamespace::WEB);
    store.clear().unwrap();
    assert!(!store.is_authenticated());
}

#[test]
fn subscribers_observe_set_and_clear() {
    let store = SessionStore::load(memory(), StorageNamespace::ADMIN);
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().unwrap());

    store.set("tok", &test_helpers::user(UserType::Admin)).unwrap();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_authenticated());

    store.clear().unwrap();
    assert!(rx.has_changed().unwrap());
    assert!(!rx.borrow_and_update().is_authenticated());
}

#[test]
fn debug_output_hides_token() {
    let store = SessionStore::load(memory(), StorageNamespace::ADMIN);
    store.set("super-secret", &test_helpers::user(UserType::Admin)).unwrap();
    let debug = format!("{store:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("authenticated: true"));
}

// =============================================================================
// failed writes
// =============================================================================

/// Memory storage whose writes to one key, and optionally all removals, fail.
struct FlakyStorage {
    inner: MemoryStorage,
    failing_key: &'static str,
    fail_removals: bool,
}

impl FlakyStorage {
    fn failure(key: &str) -> StorageError {
        StorageError::Io { path: key.into(), source: std::io::Error::other("disk full") }
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.failing_key {
            return Err(Self::failure(key));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_removals {
            return Err(Self::failure(key));
        }
        self.inner.remove(key)
    }
}

#[test]
fn failed_user_write_rolls_back_token() {
    let storage = Arc::new(FlakyStorage { inner: MemoryStorage::new(), failing_key: "admin_user", fail_removals: false });
    let store = SessionStore::load(storage.clone(), StorageNamespace::ADMIN);

    assert!(store.set("tok", &test_helpers::user(UserType::Admin)).is_err());
    assert_eq!(storage.get("admin_token"), None);
    assert!(!store.is_authenticated());
}

#[test]
fn failed_rollback_still_reports_the_write_error() {
    let storage = Arc::new(FlakyStorage { inner: MemoryStorage::new(), failing_key: "admin_user", fail_removals: true });
    let store = SessionStore::load(storage.clone(), StorageNamespace::ADMIN);

    let err = store.set("tok", &test_helpers::user(UserType::Admin)).unwrap_err();
    assert!(err.to_string().contains("admin_user"), "{err}");
    assert_eq!(storage.get("admin_token").as_deref(), Some("tok"));
    assert_eq!(store.snapshot(), Session::default());
}
