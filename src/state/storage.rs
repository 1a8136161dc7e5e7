//! Key-value storage backing the session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser's `localStorage` is the only store of truth for identity.
//! `KeyValueStore` mirrors its synchronous get/set/remove surface so the
//! session layer can run against `MemoryStorage` on the host.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Synchronous string storage with `localStorage` semantics.
///
/// Writes are best-effort: a quota or privacy-mode failure is logged by the
/// implementation and otherwise ignored, like the page scripts this replaces.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// In-process storage. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// `window.localStorage`, looked up on every call so nothing is cached
/// across page loads.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable; dropping write to {key}");
            return;
        };
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage rejected write to {key}");
        }
    }

    fn remove_item(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable; cannot remove {key}");
            return;
        };
        if storage.remove_item(key).is_err() {
            log::warn!("localStorage rejected removal of {key}");
        }
    }
}
