//! Unread-notification badge.
//!
//! The badge element shows the signed-in user's unread count, hidden at
//! zero and capped at "99+". It refreshes once at start and then on a fixed
//! period until its scheduled task is cancelled.
//!
//! ERROR HANDLING
//! ==============
//! A failed refresh is logged and leaves the badge showing its last value.

#[cfg(test)]
#[path = "badge_test.rs"]
mod badge_test;

use std::future::Future;
use std::time::Duration;

use super::navigation::Navigator;
#[cfg(feature = "hydrate")]
use super::schedule::ScheduledTask;
use crate::config::ClientConfig;
use crate::net::api::NotificationApi;
use crate::net::http::HttpClient;
use crate::net::transport::AuthenticatedTransport;
use crate::state::session::SessionStore;
use crate::state::storage::KeyValueStore;

/// Id of the badge element.
pub const BADGE_ELEMENT_ID: &str = "notification-badge";

/// Largest count shown as a number.
pub const BADGE_CAP: u64 = 99;

/// Text for `count` unread notifications, `None` when the badge is hidden.
#[must_use]
pub fn badge_label(count: u64) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_CAP => Some(format!("{BADGE_CAP}+")),
        n => Some(n.to_string()),
    }
}

pub trait BadgeTarget {
    fn show(&self, text: &str);
    fn hide(&self);
}

pub fn render_badge(target: &impl BadgeTarget, count: u64) {
    match badge_label(count) {
        Some(text) => target.show(&text),
        None => target.hide(),
    }
}

pub struct NotificationBadge<T, H, S, N> {
    target: T,
    api: NotificationApi<H, S, N>,
    store: SessionStore<S>,
}

impl<T, H, S, N> NotificationBadge<T, H, S, N>
where
    T: BadgeTarget,
    H: HttpClient,
    S: KeyValueStore + Clone,
    N: Navigator,
{
    pub fn new(target: T, transport: AuthenticatedTransport<H, S, N>, config: &ClientConfig) -> Self {
        let store = transport.store().clone();
        Self { target, api: NotificationApi::new(transport, config), store }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Fetch the unread count and render it. Returns the count on success.
    pub async fn refresh(&self) -> Option<u64> {
        let Some(user_id) = self.store.get().user_id else {
            log::debug!("no signed-in user; hiding notification badge");
            self.target.hide();
            return None;
        };
        match self.api.count_unread(&user_id).await {
            Ok(count) => {
                render_badge(&self.target, count);
                Some(count)
            }
            Err(err) => {
                log::warn!("notification badge not updated: {err}");
                None
            }
        }
    }

    /// Refresh now, then after every `sleep(period)`, forever.
    pub async fn run<Sl, Fut>(&self, period: Duration, mut sleep: Sl)
    where
        Sl: FnMut(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        loop {
            self.refresh().await;
            sleep(period).await;
        }
    }
}

#[cfg(feature = "hydrate")]
impl<T, H, S, N> NotificationBadge<T, H, S, N>
where
    T: BadgeTarget + 'static,
    H: HttpClient + 'static,
    S: KeyValueStore + Clone + 'static,
    N: Navigator + 'static,
{
    /// Start periodic refresh on the browser task queue.
    pub fn start(self, period: Duration) -> ScheduledTask {
        ScheduledTask::spawn(async move {
            self.run(period, gloo_timers::future::sleep).await;
        })
    }
}

/// The `#notification-badge` element of the live document. Missing element
/// means nothing to render.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserBadge;

#[cfg(feature = "hydrate")]
impl BrowserBadge {
    fn element() -> Option<web_sys::HtmlElement> {
        use wasm_bindgen::JsCast;

        web_sys::window()?
            .document()?
            .get_element_by_id(BADGE_ELEMENT_ID)?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()
    }
}

#[cfg(feature = "hydrate")]
impl BadgeTarget for BrowserBadge {
    fn show(&self, text: &str) {
        if let Some(element) = Self::element() {
            element.set_text_content(Some(text));
            let _ = element.style().set_property("display", "inline-block");
        }
    }

    fn hide(&self) {
        if let Some(element) = Self::element() {
            let _ = element.style().set_property("display", "none");
        }
    }
}
