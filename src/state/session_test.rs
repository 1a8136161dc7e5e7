use super::*;
use crate::state::storage::MemoryStorage;

// =============================================================
// Helpers
// =============================================================

fn token_store() -> (MemoryStorage, SessionStore<MemoryStorage>) {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone(), StorageKeys::default(), AuthSignal::Token);
    (storage, store)
}

fn user_id_store() -> (MemoryStorage, SessionStore<MemoryStorage>) {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone(), StorageKeys::default(), AuthSignal::UserId);
    (storage, store)
}

fn full_session() -> Session {
    Session {
        user_id: Some("4".to_owned()),
        user_name: Some("Aminata Sow".to_owned()),
        role: Some("EMPLOYE".to_owned()),
        token: Some("abc123".to_owned()),
    }
}

// =============================================================
// Role
// =============================================================

#[test]
fn role_parses_stored_tags() {
    assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
    assert_eq!("MANAGER".parse::<Role>(), Ok(Role::Manager));
    assert_eq!("EMPLOYE".parse::<Role>(), Ok(Role::Employe));
}

#[test]
fn role_parse_is_case_sensitive() {
    assert_eq!("admin".parse::<Role>(), Err(UnknownRole("admin".to_owned())));
    assert!("".parse::<Role>().is_err());
}

#[test]
fn unknown_role_error_names_the_tag() {
    let err = "SUPERVISEUR".parse::<Role>().unwrap_err();
    assert_eq!(err.to_string(), "unknown role: SUPERVISEUR");
    let _: &dyn std::error::Error = &err;
}

#[test]
fn role_display_matches_tag() {
    for role in Role::ALL {
        assert_eq!(role.to_string(), role.as_str());
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
    }
}

#[test]
fn role_serde_uses_uppercase_tags() {
    assert_eq!(serde_json::to_string(&Role::Employe).unwrap(), "\"EMPLOYE\"");
    assert_eq!(serde_json::from_str::<Role>("\"MANAGER\"").unwrap(), Role::Manager);
}

// =============================================================
// Session
// =============================================================

#[test]
fn session_role_ignores_empty_and_unknown() {
    let mut session = Session { role: Some(String::new()), ..Session::default() };
    assert_eq!(session.role(), None);
    assert_eq!(session.role_tag(), None);
    session.role = Some("SUPERVISEUR".to_owned());
    assert_eq!(session.role(), None);
    assert_eq!(session.role_tag(), Some("SUPERVISEUR"));
    session.role = Some("ADMIN".to_owned());
    assert_eq!(session.role(), Some(Role::Admin));
}

// =============================================================
// SessionStore
// =============================================================

#[test]
fn get_on_empty_storage_is_all_absent() {
    let (_, store) = token_store();
    assert_eq!(store.get(), Session::default());
    assert!(!store.is_authenticated());
}

#[test]
fn write_then_get_round_trips() {
    let (_, store) = token_store();
    store.write(&full_session());
    assert_eq!(store.get(), full_session());
}

#[test]
fn write_then_get_keeps_empty_string_distinct_from_absent() {
    let (_, store) = token_store();
    let session = Session {
        user_id: Some(String::new()),
        user_name: Some(String::new()),
        role: None,
        token: None,
    };
    store.write(&session);
    assert_eq!(store.get(), session);
}

#[test]
fn partial_write_leaves_other_fields() {
    let (_, store) = token_store();
    store.write(&full_session());
    store.write(&Session::with_token("rotated"));
    let session = store.get();
    assert_eq!(session.token.as_deref(), Some("rotated"));
    assert_eq!(session.user_name.as_deref(), Some("Aminata Sow"));
}

#[test]
fn write_uses_configured_keys() {
    let (storage, store) = token_store();
    store.write(&full_session());
    assert_eq!(storage.get_item("userId").as_deref(), Some("4"));
    assert_eq!(storage.get_item("userName").as_deref(), Some("Aminata Sow"));
    assert_eq!(storage.get_item("userRole").as_deref(), Some("EMPLOYE"));
    assert_eq!(storage.get_item("authToken").as_deref(), Some("abc123"));
}

#[test]
fn clear_removes_all_keys() {
    let (storage, store) = token_store();
    store.write(&full_session());
    storage.set_item("unrelated", "kept");
    store.clear();
    assert_eq!(store.get(), Session::default());
    assert_eq!(storage.len(), 1);
}

#[test]
fn clear_then_is_authenticated_is_false_for_both_signals() {
    let (_, token) = token_store();
    token.write(&full_session());
    token.clear();
    assert!(!token.is_authenticated());

    let (_, user_id) = user_id_store();
    user_id.write(&full_session());
    user_id.clear();
    assert!(!user_id.is_authenticated());
}

#[test]
fn token_signal_ignores_user_id() {
    let (_, store) = token_store();
    store.write(&Session { user_id: Some("4".to_owned()), ..Session::default() });
    assert!(!store.is_authenticated());
    store.write(&Session::with_token("abc123"));
    assert!(store.is_authenticated());
}

#[test]
fn user_id_signal_ignores_token() {
    let (_, store) = user_id_store();
    store.write(&Session::with_token("abc123"));
    assert!(!store.is_authenticated());
    store.write(&Session { user_id: Some("4".to_owned()), ..Session::default() });
    assert!(store.is_authenticated());
}

#[test]
fn stored_empty_token_still_counts_as_present() {
    let (_, store) = token_store();
    store.write(&Session::with_token(""));
    assert!(store.is_authenticated());
}

#[test]
fn seed_dev_session_writes_when_signed_out() {
    let (_, store) = user_id_store();
    assert!(store.seed_dev_session(&DevSession::default()));
    let session = store.get();
    assert_eq!(session.user_id.as_deref(), Some("4"));
    assert_eq!(session.user_name.as_deref(), Some("Aminata Sow"));
    assert_eq!(session.role(), Some(Role::Employe));
    assert_eq!(session.token, None);
    assert!(store.is_authenticated());
}

#[test]
fn seed_dev_session_keeps_existing_session() {
    let (_, store) = user_id_store();
    store.write(&Session { user_id: Some("9".to_owned()), ..Session::default() });
    assert!(!store.seed_dev_session(&DevSession::default()));
    assert_eq!(store.get().user_id.as_deref(), Some("9"));
}
