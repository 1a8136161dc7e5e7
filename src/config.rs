//! Client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `ClientConfig` value is built at boot and handed to every component
//! constructor. Each backend module (authentication, absences) has its own
//! preset because the two deployments disagree on base URL, login page and
//! which stored key signals "signed in".

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_ACCESS_DENIED_DELAY_MS: u64 = 1500;
pub const DEFAULT_ALERT_DISPLAY_MS: u64 = 5000;
pub const DEFAULT_ALERT_FADE_MS: u64 = 300;
pub const DEFAULT_BADGE_REFRESH_MS: u64 = 30_000;

pub const AUTHENTICATION_API_BASE_URL: &str = "http://localhost:8080/module-authentification/api";
pub const ABSENCES_API_BASE_URL: &str = "http://localhost:8080/absences-notifications/api";

/// Id of the optional inline JSON config block read by [`ClientConfig::from_document`].
pub const CONFIG_ELEMENT_ID: &str = "leave-client-config";

/// Which stored field decides whether the browser is signed in.
///
/// The authentication module issues bearer tokens and checks the token key;
/// the absences module has no token concept and checks the user id key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthSignal {
    Token,
    UserId,
}

/// `localStorage` key names for the four session fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
    pub token: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            user_id: "userId".to_owned(),
            user_name: "userName".to_owned(),
            user_role: "userRole".to_owned(),
            token: "authToken".to_owned(),
        }
    }
}

impl StorageKeys {
    /// All four keys, in storage order.
    #[must_use]
    pub fn all(&self) -> [&str; 4] {
        [&self.user_id, &self.user_name, &self.user_role, &self.token]
    }
}

/// Identity written by the local-testing seed path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevSession {
    pub user_id: String,
    pub user_name: String,
    pub role: String,
}

impl Default for DevSession {
    fn default() -> Self {
        Self { user_id: "4".to_owned(), user_name: "Aminata Sow".to_owned(), role: "EMPLOYE".to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub login_page: String,
    pub home_page: String,
    pub storage_keys: StorageKeys,
    pub auth_signal: AuthSignal,
    pub access_denied_delay_ms: u64,
    pub alert_display_ms: u64,
    pub alert_fade_ms: u64,
    pub badge_refresh_ms: u64,
    /// `None` keeps requests unbounded, matching the historical behavior.
    pub request_timeout_ms: Option<u64>,
    /// Seed identity for local testing. Never applied unless set.
    pub dev_session: Option<DevSession>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::authentication()
    }
}

impl ClientConfig {
    /// Preset for pages served by the authentication module.
    #[must_use]
    pub fn authentication() -> Self {
        Self {
            api_base_url: AUTHENTICATION_API_BASE_URL.to_owned(),
            login_page: "login.html".to_owned(),
            home_page: "index.html".to_owned(),
            storage_keys: StorageKeys::default(),
            auth_signal: AuthSignal::Token,
            access_denied_delay_ms: DEFAULT_ACCESS_DENIED_DELAY_MS,
            alert_display_ms: DEFAULT_ALERT_DISPLAY_MS,
            alert_fade_ms: DEFAULT_ALERT_FADE_MS,
            badge_refresh_ms: DEFAULT_BADGE_REFRESH_MS,
            request_timeout_ms: None,
            dev_session: None,
        }
    }

    /// Preset for pages served by the absences/notifications module.
    #[must_use]
    pub fn absences() -> Self {
        Self {
            api_base_url: ABSENCES_API_BASE_URL.to_owned(),
            login_page: "/login.html".to_owned(),
            auth_signal: AuthSignal::UserId,
            ..Self::authentication()
        }
    }

    /// Enable the local-testing seed session.
    #[must_use]
    pub fn with_dev_session(mut self, session: DevSession) -> Self {
        self.dev_session = Some(session);
        self
    }

    /// Parse a JSON document over the defaults and validate the result.
    ///
    /// Missing fields keep their default; a `preset` field (`"authentication"`
    /// or `"absences"`) selects the base before the overlay is applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or an unknown preset,
    /// and [`ConfigError::Invalid`] when a required field ends up empty.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let base = match value.get("preset").and_then(serde_json::Value::as_str) {
            None | Some("authentication") => Self::authentication(),
            Some("absences") => Self::absences(),
            Some(other) => return Err(ConfigError::Parse(format!("unknown preset: {other}"))),
        };
        let config = overlay(base, value)?;
        config.validated()
    }

    /// Read the inline config block from the current document, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientConfig::from_json`] failures for a present but
    /// malformed block.
    pub fn from_document(fallback: Self) -> Result<Self, ConfigError> {
        #[cfg(feature = "hydrate")]
        {
            let raw = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
                .and_then(|el| el.text_content());
            match raw {
                Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
                _ => Ok(fallback),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(fallback)
        }
    }

    /// Join an API path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    #[must_use]
    pub fn access_denied_delay(&self) -> Duration {
        Duration::from_millis(self.access_denied_delay_ms)
    }

    #[must_use]
    pub fn alert_display(&self) -> Duration {
        Duration::from_millis(self.alert_display_ms)
    }

    #[must_use]
    pub fn alert_fade(&self) -> Duration {
        Duration::from_millis(self.alert_fade_ms)
    }

    #[must_use]
    pub fn badge_refresh(&self) -> Duration {
        Duration::from_millis(self.badge_refresh_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_owned();
        if self.api_base_url.is_empty() {
            return Err(ConfigError::Invalid { field: "api_base_url", reason: "must not be empty".to_owned() });
        }
        if self.login_page.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "login_page", reason: "must not be empty".to_owned() });
        }
        if self.storage_keys.all().iter().any(|key| key.is_empty()) {
            return Err(ConfigError::Invalid { field: "storage_keys", reason: "keys must not be empty".to_owned() });
        }
        Ok(self)
    }
}

fn overlay(base: ClientConfig, mut value: serde_json::Value) -> Result<ClientConfig, ConfigError> {
    let serde_json::Value::Object(fields) = &mut value else {
        return Err(ConfigError::Parse("config must be a JSON object".to_owned()));
    };
    fields.remove("preset");

    let serde_json::Value::Object(mut merged) =
        serde_json::to_value(&base).map_err(|e| ConfigError::Parse(e.to_string()))?
    else {
        return Err(ConfigError::Parse("config base is not an object".to_owned()));
    };
    for (key, field) in std::mem::take(fields) {
        merged.insert(key, field);
    }
    serde_json::from_value(serde_json::Value::Object(merged)).map_err(|e| ConfigError::Parse(e.to_string()))
}
