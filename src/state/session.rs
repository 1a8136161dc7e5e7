//! Session identity persisted in browser storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every read goes back to storage; nothing is cached in memory, so a page
//! always sees what the last page (or the last 401) left behind.
//!
//! TRADE-OFFS
//! ==========
//! There is no locking around the four keys. A 401-triggered `clear` racing
//! an in-flight login `write` can leave a token without a profile (or the
//! reverse). That is accepted for a single user in a single tab and is not
//! papered over here.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::storage::KeyValueStore;
use crate::config::{AuthSignal, ClientConfig, DevSession, StorageKeys};

/// Closed set of application roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Employe,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Employe];

    /// Wire/storage tag for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Employe => "EMPLOYE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Exact, case-sensitive match on the stored tag.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == raw)
            .ok_or_else(|| UnknownRole(raw.to_owned()))
    }
}

/// The four stored identity fields. `None` means the key is absent, which is
/// distinct from a stored empty string.
///
/// `role` keeps the raw stored text; [`Session::role`] parses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub role: Option<String>,
    pub token: Option<String>,
}

impl Session {
    /// A token-only session, as written right after a successful login.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()), ..Self::default() }
    }

    /// Parsed role. Absent, empty and unrecognized tags all yield `None`.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().filter(|r| !r.is_empty())?.parse().ok()
    }

    /// Raw non-empty role tag, recognized or not.
    #[must_use]
    pub fn role_tag(&self) -> Option<&str> {
        self.role.as_deref().filter(|r| !r.is_empty())
    }
}

/// Reads and writes the session fields under configured storage keys.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    storage: S,
    keys: StorageKeys,
    signal: AuthSignal,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S, keys: StorageKeys, signal: AuthSignal) -> Self {
        Self { storage, keys, signal }
    }

    pub fn from_config(storage: S, config: &ClientConfig) -> Self {
        Self::new(storage, config.storage_keys.clone(), config.auth_signal)
    }

    #[must_use]
    pub fn signal(&self) -> AuthSignal {
        self.signal
    }

    /// Read all four fields. Never fails; missing keys come back as `None`.
    #[must_use]
    pub fn get(&self) -> Session {
        Session {
            user_id: self.storage.get_item(&self.keys.user_id),
            user_name: self.storage.get_item(&self.keys.user_name),
            role: self.storage.get_item(&self.keys.user_role),
            token: self.storage.get_item(&self.keys.token),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.get_item(&self.keys.token)
    }

    /// Module-specific "signed in" predicate: token presence or user id
    /// presence, depending on the configured [`AuthSignal`]. Pure read.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let key = match self.signal {
            AuthSignal::Token => &self.keys.token,
            AuthSignal::UserId => &self.keys.user_id,
        };
        self.storage.get_item(key).is_some()
    }

    /// Overwrite every field that is `Some` in `session`; `None` fields are
    /// left as they are, which is how login stores the token before the
    /// profile is known.
    pub fn write(&self, session: &Session) {
        let fields = [
            (&self.keys.user_id, &session.user_id),
            (&self.keys.user_name, &session.user_name),
            (&self.keys.user_role, &session.role),
            (&self.keys.token, &session.token),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                self.storage.set_item(key, value);
            }
        }
    }

    /// Remove all four keys.
    pub fn clear(&self) {
        for key in self.keys.all() {
            self.storage.remove_item(key);
        }
    }

    /// Write `seed` unless the module predicate already reports a session.
    /// Returns whether a seed was written.
    pub fn seed_dev_session(&self, seed: &DevSession) -> bool {
        if self.is_authenticated() {
            return false;
        }
        log::warn!("seeding development session for user {}", seed.user_id);
        self.write(&Session {
            user_id: Some(seed.user_id.clone()),
            user_name: Some(seed.user_name.clone()),
            role: Some(seed.role.clone()),
            token: None,
        });
        true
    }
}
