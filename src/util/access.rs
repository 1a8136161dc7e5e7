//! Role-based access checks for pages and page elements.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every decision here is derived from the stored session at call time.
//! None of it is a security boundary: the backend authorizes each call.
//!
//! TRADE-OFFS
//! ==========
//! `apply_role_security` only sets `display: none`. Hidden elements stay in
//! the DOM with their handlers attached and can be revealed from devtools.
//! `require_role` waits a short grace period so the notice can be read;
//! whatever rendered before the check is already visible and must not be
//! treated as protected.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;
use std::time::Duration;

use super::alert::{ACCESS_DENIED_MESSAGE, Alerts};
use super::navigation::Navigator;
use crate::config::ClientConfig;
use crate::state::auth::{AuthPhase, should_redirect_to_login};
use crate::state::session::{Role, Session, SessionStore};
use crate::state::storage::KeyValueStore;

/// Attribute carrying a comma-separated allow-list of role tags.
pub const ROLE_ATTRIBUTE: &str = "data-role";

/// An allow-list of roles: a single role or any collection of them.
pub trait RoleSet {
    fn admits(&self, role: Role) -> bool;
}

impl RoleSet for Role {
    fn admits(&self, role: Role) -> bool {
        *self == role
    }
}

impl RoleSet for [Role] {
    fn admits(&self, role: Role) -> bool {
        self.contains(&role)
    }
}

impl<const N: usize> RoleSet for [Role; N] {
    fn admits(&self, role: Role) -> bool {
        self.contains(&role)
    }
}

impl RoleSet for Vec<Role> {
    fn admits(&self, role: Role) -> bool {
        self.contains(&role)
    }
}

impl<H: BuildHasher> RoleSet for HashSet<Role, H> {
    fn admits(&self, role: Role) -> bool {
        self.contains(&role)
    }
}

impl RoleSet for BTreeSet<Role> {
    fn admits(&self, role: Role) -> bool {
        self.contains(&role)
    }
}

impl<T: RoleSet + ?Sized> RoleSet for &T {
    fn admits(&self, role: Role) -> bool {
        (**self).admits(role)
    }
}

/// Fail-closed membership check: no role, or an unrecognized one, is never
/// admitted.
#[must_use]
pub fn session_has_role(session: &Session, allowed: &(impl RoleSet + ?Sized)) -> bool {
    session.role().is_some_and(|role| allowed.admits(role))
}

/// Visibility for an element carrying `marker`.
///
/// An empty marker imposes nothing. Otherwise the element stays visible only
/// when `role` is one of the listed tags. Entries are compared verbatim, so
/// `"ADMIN, MANAGER"` lists `" MANAGER"`, not `"MANAGER"`.
#[must_use]
pub fn marker_admits(marker: &str, role: Option<&str>) -> bool {
    if marker.is_empty() {
        return true;
    }
    role.is_some_and(|role| marker.split(',').any(|tag| tag == role))
}

/// A page element that may carry a role marker.
pub trait RoleMarked {
    fn role_marker(&self) -> Option<String>;
    fn hide(&self);
}

/// Source of role-marked elements for the current page.
pub trait RoleDocument {
    type Element: RoleMarked;

    fn role_marked_elements(&self) -> Vec<Self::Element>;
}

pub struct AccessControl<S, N, A> {
    store: SessionStore<S>,
    navigator: N,
    alerts: A,
    login_page: String,
    access_denied_delay: Duration,
}

impl<S, N, A> AccessControl<S, N, A>
where
    S: KeyValueStore,
    N: Navigator,
    A: Alerts,
{
    pub fn new(store: SessionStore<S>, navigator: N, alerts: A, config: &ClientConfig) -> Self {
        Self {
            store,
            navigator,
            alerts,
            login_page: config.login_page.clone(),
            access_denied_delay: config.access_denied_delay(),
        }
    }

    #[must_use]
    pub fn current_user(&self) -> Session {
        self.store.get()
    }

    #[must_use]
    pub fn has_role(&self, allowed: &(impl RoleSet + ?Sized)) -> bool {
        session_has_role(&self.store.get(), allowed)
    }

    /// Check the role; on failure show the access-denied notice, schedule a
    /// redirect to `redirect_target` after the grace delay, and return false.
    pub fn require_role(&self, allowed: &(impl RoleSet + ?Sized), redirect_target: &str) -> bool {
        if self.has_role(allowed) {
            return true;
        }
        log::warn!("access denied; redirecting to {redirect_target}");
        self.alerts.error(ACCESS_DENIED_MESSAGE);
        self.navigator.navigate_after(redirect_target, self.access_denied_delay);
        false
    }

    /// Hide every marked element the current role is not listed in.
    /// Returns how many elements were hidden.
    pub fn apply_role_security<D: RoleDocument>(&self, document: &D) -> usize {
        let session = self.store.get();
        let role = session.role_tag();
        let mut hidden = 0;
        for element in document.role_marked_elements() {
            let Some(marker) = element.role_marker() else {
                continue;
            };
            if !marker_admits(&marker, role) {
                element.hide();
                hidden += 1;
            }
        }
        hidden
    }

    /// Navigate to the login page immediately when signed out.
    pub fn require_auth(&self) {
        if !self.store.is_authenticated() {
            self.navigator.navigate(&self.login_page);
        }
    }

    /// Page-load check: bounce signed-out visitors off any page other than
    /// the login page. Returns whether a redirect was issued.
    pub fn guard_page(&self) -> bool {
        let phase = AuthPhase::derive(self.store.is_authenticated(), false);
        let path = self.navigator.current_path();
        if should_redirect_to_login(phase, &path, &self.login_page) {
            self.navigator.navigate(&self.login_page);
            return true;
        }
        false
    }
}

/// The live document.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDocument;

#[cfg(feature = "hydrate")]
impl RoleMarked for web_sys::HtmlElement {
    fn role_marker(&self) -> Option<String> {
        self.get_attribute(ROLE_ATTRIBUTE)
    }

    fn hide(&self) {
        let _ = self.style().set_property("display", "none");
    }
}

#[cfg(feature = "hydrate")]
impl RoleDocument for BrowserDocument {
    type Element = web_sys::HtmlElement;

    fn role_marked_elements(&self) -> Vec<Self::Element> {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Vec::new();
        };
        let Ok(nodes) = document.query_selector_all(&format!("[{ROLE_ATTRIBUTE}]")) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|idx| nodes.item(idx))
            .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            .collect()
    }
}
