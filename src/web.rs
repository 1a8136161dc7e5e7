//! `wasm-bindgen` surface for page scripts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page calls `boot` once, optionally with a JSON config string, and
//! then uses the exported helpers. `boot` installs console logging and the
//! panic hook, resolves the config (argument, then inline
//! `#leave-client-config` block, then the authentication preset), seeds the
//! development session when configured, and runs the page-load guard.
//!
//! ERROR HANDLING
//! ==============
//! Errors cross into JavaScript as string `JsValue`s carrying
//! [`ClientError::user_message`]. Calling a helper before `boot` is an error,
//! not a panic.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::net::auth::AuthGateway;
use crate::net::http::GlooHttpClient;
use crate::net::transport::AuthenticatedTransport;
use crate::state::session::{Role, SessionStore};
use crate::state::storage::BrowserStorage;
use crate::util::access::{AccessControl, BrowserDocument};
use crate::util::alert::{AlertTiming, Alerts, BrowserAlerts};
use crate::util::badge::{BrowserBadge, NotificationBadge};
use crate::util::navigation::BrowserNavigator;
use crate::util::schedule::ScheduledTask;

type BrowserTransport = AuthenticatedTransport<GlooHttpClient, BrowserStorage, BrowserNavigator>;

struct Client {
    config: ClientConfig,
    gateway: AuthGateway<GlooHttpClient, BrowserStorage, BrowserNavigator>,
    access: AccessControl<BrowserStorage, BrowserNavigator, BrowserAlerts>,
    alerts: BrowserAlerts,
    badge: RefCell<Option<ScheduledTask>>,
}

impl Client {
    fn new(config: ClientConfig) -> Self {
        let store = SessionStore::from_config(BrowserStorage, &config);
        let transport: BrowserTransport = AuthenticatedTransport::new(
            GlooHttpClient::new(config.request_timeout()),
            store.clone(),
            BrowserNavigator,
            &config,
        );
        let alerts = BrowserAlerts::new(AlertTiming::from_config(&config));
        Self {
            gateway: AuthGateway::new(transport, &config),
            access: AccessControl::new(store, BrowserNavigator, alerts, &config),
            alerts,
            badge: RefCell::new(None),
            config,
        }
    }
}

thread_local! {
    static CLIENT: RefCell<Option<Rc<Client>>> = const { RefCell::new(None) };
}

fn client() -> Result<Rc<Client>, JsValue> {
    CLIENT
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("leave client not booted"))
}

fn js_error(err: &ClientError) -> JsValue {
    JsValue::from_str(&err.user_message())
}

/// Initialize logging, config and the page-load guard.
///
/// # Errors
///
/// Returns the config error text for a malformed config.
#[wasm_bindgen]
pub fn boot(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json {
        Some(raw) => ClientConfig::from_json(&raw),
        None => ClientConfig::from_document(ClientConfig::authentication()),
    }
    .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let client = Rc::new(Client::new(config));
    if let Some(seed) = &client.config.dev_session {
        client.gateway.transport().store().seed_dev_session(seed);
    }
    CLIENT.with(|slot| *slot.borrow_mut() = Some(client.clone()));

    if client.access.guard_page() {
        log::info!("signed out; redirected to {}", client.config.login_page);
    }
    Ok(())
}

/// # Errors
///
/// Returns the user-facing login failure text.
#[wasm_bindgen]
pub async fn login(username: String, password: String) -> Result<(), JsValue> {
    let client = client()?;
    client.gateway.login(&username, &password).await.map_err(|err| js_error(&err))
}

#[wasm_bindgen]
pub fn logout() -> Result<(), JsValue> {
    let client = client()?;
    if let Some(task) = client.badge.borrow_mut().take() {
        task.cancel();
    }
    client.gateway.logout();
    Ok(())
}

/// Fetch the profile and return the stored session, or `null`.
///
/// # Errors
///
/// Only when called before `boot`.
#[wasm_bindgen]
pub async fn load_profile() -> Result<JsValue, JsValue> {
    let client = client()?;
    let Some(session) = client.gateway.load_profile().await else {
        return Ok(JsValue::NULL);
    };
    let json = serde_json::to_string(&session).map_err(|err| JsValue::from_str(&err.to_string()))?;
    js_sys::JSON::parse(&json)
}

#[wasm_bindgen]
pub fn require_auth() -> Result<(), JsValue> {
    client()?.access.require_auth();
    Ok(())
}

/// Role tags this client does not know are ignored.
#[wasm_bindgen]
pub fn require_role(roles: Vec<String>, redirect_target: String) -> Result<bool, JsValue> {
    let allowed: Vec<Role> = roles
        .iter()
        .filter_map(|tag| {
            tag.parse::<Role>()
                .inspect_err(|err| log::warn!("ignoring role in allow-list: {err}"))
                .ok()
        })
        .collect();
    Ok(client()?.access.require_role(&allowed, &redirect_target))
}

/// Returns how many elements were hidden.
#[wasm_bindgen]
pub fn apply_role_security() -> Result<u32, JsValue> {
    let hidden = client()?.access.apply_role_security(&BrowserDocument);
    Ok(u32::try_from(hidden).unwrap_or(u32::MAX))
}

#[wasm_bindgen]
pub fn show_success(message: &str) -> Result<(), JsValue> {
    client()?.alerts.success(message);
    Ok(())
}

#[wasm_bindgen]
pub fn show_error(message: &str) -> Result<(), JsValue> {
    client()?.alerts.error(message);
    Ok(())
}

/// Start (or restart) periodic badge refresh.
#[wasm_bindgen]
pub fn start_notification_badge() -> Result<(), JsValue> {
    let client = client()?;
    let badge = NotificationBadge::new(BrowserBadge, client.gateway.transport().clone(), &client.config);
    let task = badge.start(client.config.badge_refresh());
    if let Some(previous) = client.badge.borrow_mut().replace(task) {
        previous.cancel();
    }
    Ok(())
}
