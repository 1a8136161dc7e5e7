//! Page navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Navigation is the only enforcement the client has: access checks and
//! session expiry all end in a `location.href` assignment.

use std::time::Duration;

use super::schedule::ScheduledTask;

pub trait Navigator {
    /// Navigate now.
    fn navigate(&self, href: &str);

    /// Navigate after `delay`, unless the returned task is cancelled first.
    fn navigate_after(&self, href: &str, delay: Duration) -> ScheduledTask;

    /// Path of the current page.
    fn current_path(&self) -> String;
}

/// `window.location` navigation.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, href: &str) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window; cannot navigate to {href}");
            return;
        };
        if window.location().set_href(href).is_err() {
            log::warn!("navigation to {href} rejected");
        }
    }

    fn navigate_after(&self, href: &str, delay: Duration) -> ScheduledTask {
        let href = href.to_owned();
        ScheduledTask::spawn(async move {
            gloo_timers::future::sleep(delay).await;
            BrowserNavigator.navigate(&href);
        })
    }

    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }
}
