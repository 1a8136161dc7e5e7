//! Transient alert banners.
//!
//! Each alert is a `div.alert.alert-<kind>` appended to `<body>`. After the
//! display period it fades out and is removed. The removal is a
//! [`ScheduledTask`], so dismissing early cancels it instead of leaving a
//! timer pointing at a detached element.

#[cfg(test)]
#[path = "alert_test.rs"]
mod alert_test;

use std::time::Duration;

use super::schedule::ScheduledTask;
use crate::config::ClientConfig;

/// Notice shown before an access-denied redirect.
pub const ACCESS_DENIED_MESSAGE: &str = "Accès refusé : vous n'avez pas les droits nécessaires.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Info,
}

impl AlertKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Class attribute for the banner element.
    #[must_use]
    pub fn class_name(self) -> String {
        format!("alert alert-{}", self.as_str())
    }
}

/// Display and fade timings for one banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlertTiming {
    pub display: Duration,
    pub fade: Duration,
}

impl AlertTiming {
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self { display: config.alert_display(), fade: config.alert_fade() }
    }

    /// Time from insertion to removal.
    #[must_use]
    pub fn lifetime(self) -> Duration {
        self.display + self.fade
    }
}

/// Handle to a shown alert.
#[derive(Clone, Debug)]
pub struct AlertHandle {
    removal: ScheduledTask,
    #[cfg(feature = "hydrate")]
    element: Option<web_sys::Element>,
}

impl AlertHandle {
    /// Handle whose only effect is cancelling `removal`.
    #[must_use]
    pub fn detached(removal: ScheduledTask) -> Self {
        Self {
            removal,
            #[cfg(feature = "hydrate")]
            element: None,
        }
    }

    /// Remove the alert now and cancel its scheduled removal.
    pub fn dismiss(&self) {
        self.removal.cancel();
        #[cfg(feature = "hydrate")]
        if let Some(element) = &self.element {
            element.remove();
        }
    }

    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        self.removal.is_cancelled()
    }
}

pub trait Alerts {
    fn show(&self, message: &str, kind: AlertKind) -> AlertHandle;

    fn success(&self, message: &str) -> AlertHandle {
        self.show(message, AlertKind::Success)
    }

    fn error(&self, message: &str) -> AlertHandle {
        self.show(message, AlertKind::Error)
    }
}

/// DOM-backed alerts.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug)]
pub struct BrowserAlerts {
    timing: AlertTiming,
}

#[cfg(feature = "hydrate")]
impl BrowserAlerts {
    #[must_use]
    pub fn new(timing: AlertTiming) -> Self {
        Self { timing }
    }

    fn create(message: &str, kind: AlertKind) -> Option<web_sys::Element> {
        let document = web_sys::window()?.document()?;
        let element = document.create_element("div").ok()?;
        element.set_class_name(&kind.class_name());
        element.set_text_content(Some(message));
        document.body()?.append_child(&element).ok()?;
        Some(element)
    }
}

#[cfg(feature = "hydrate")]
impl Alerts for BrowserAlerts {
    fn show(&self, message: &str, kind: AlertKind) -> AlertHandle {
        use wasm_bindgen::JsCast;

        let Some(element) = Self::create(message, kind) else {
            log::warn!("alert not shown (no document body): {message}");
            return AlertHandle::detached(ScheduledTask::new(async {}).0);
        };
        let timing = self.timing;
        let target = element.clone();
        let removal = ScheduledTask::spawn(async move {
            gloo_timers::future::sleep(timing.display).await;
            if let Some(html) = target.dyn_ref::<web_sys::HtmlElement>() {
                let style = html.style();
                let _ = style.set_property("opacity", "0");
                let _ = style.set_property("transform", "translateY(100px)");
                let _ = style.set_property("transition", "0.3s ease-in");
            }
            gloo_timers::future::sleep(timing.fade).await;
            target.remove();
        });
        AlertHandle { removal, element: Some(element) }
    }
}
