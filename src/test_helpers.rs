//! In-memory doubles for the browser seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::net::http::{HttpClient, HttpRequest, HttpResponse};
use crate::net::transport::AuthenticatedTransport;
use crate::state::session::SessionStore;
use crate::state::storage::MemoryStorage;
use crate::util::access::{RoleDocument, RoleMarked};
use crate::util::alert::{AlertHandle, AlertKind, Alerts};
use crate::util::badge::BadgeTarget;
use crate::util::navigation::Navigator;
use crate::util::schedule::ScheduledTask;

// =============================================================================
// HTTP
// =============================================================================

/// Replays queued outcomes in order and records every request sent.
#[derive(Clone, Default)]
pub struct ScriptedHttp {
    outcomes: Rc<RefCell<VecDeque<Result<HttpResponse, ClientError>>>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond(status, &body.to_string())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.outcomes
            .borrow_mut()
            .push_back(Err(ClientError::Transport(message.to_owned())));
        self
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.sent.borrow().last().cloned().expect("no request sent")
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for ScriptedHttp {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        self.sent.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted response".to_owned())))
    }
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
    pub delay: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    log: Rc<RefCell<Vec<Navigation>>>,
    path: Rc<RefCell<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        let nav = Self::default();
        *nav.path.borrow_mut() = path.to_owned();
        nav
    }

    pub fn navigations(&self) -> Vec<Navigation> {
        self.log.borrow().clone()
    }

    pub fn immediate(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|n| n.delay.is_none())
            .map(|n| n.href.clone())
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, href: &str) {
        self.log.borrow_mut().push(Navigation { href: href.to_owned(), delay: None });
        *self.path.borrow_mut() = href.to_owned();
    }

    fn navigate_after(&self, href: &str, delay: Duration) -> ScheduledTask {
        self.log.borrow_mut().push(Navigation { href: href.to_owned(), delay: Some(delay) });
        ScheduledTask::new(async {}).0
    }

    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }
}

// =============================================================================
// ALERTS
// =============================================================================

#[derive(Clone, Default)]
pub struct RecordingAlerts {
    shown: Rc<RefCell<Vec<(AlertKind, String)>>>,
}

impl RecordingAlerts {
    pub fn shown(&self) -> Vec<(AlertKind, String)> {
        self.shown.borrow().clone()
    }
}

impl Alerts for RecordingAlerts {
    fn show(&self, message: &str, kind: AlertKind) -> AlertHandle {
        self.shown.borrow_mut().push((kind, message.to_owned()));
        AlertHandle::detached(ScheduledTask::new(async {}).0)
    }
}

// =============================================================================
// DOM
// =============================================================================

#[derive(Clone, Debug)]
pub struct FakeElement {
    marker: Option<String>,
    hidden: Rc<Cell<bool>>,
}

impl FakeElement {
    pub fn marked(marker: &str) -> Self {
        Self { marker: Some(marker.to_owned()), hidden: Rc::new(Cell::new(false)) }
    }

    pub fn unmarked() -> Self {
        Self { marker: None, hidden: Rc::new(Cell::new(false)) }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }
}

impl RoleMarked for FakeElement {
    fn role_marker(&self) -> Option<String> {
        self.marker.clone()
    }

    fn hide(&self) {
        self.hidden.set(true);
    }
}

pub struct FakeDocument(pub Vec<FakeElement>);

impl RoleDocument for FakeDocument {
    type Element = FakeElement;

    fn role_marked_elements(&self) -> Vec<FakeElement> {
        self.0.clone()
    }
}

/// Badge element double: `None` while hidden, `Some(text)` while shown.
#[derive(Clone, Default)]
pub struct FakeBadge {
    state: Rc<RefCell<Option<String>>>,
}

impl FakeBadge {
    pub fn label(&self) -> Option<String> {
        self.state.borrow().clone()
    }
}

impl BadgeTarget for FakeBadge {
    fn show(&self, text: &str) {
        *self.state.borrow_mut() = Some(text.to_owned());
    }

    fn hide(&self) {
        *self.state.borrow_mut() = None;
    }
}

// =============================================================================
// WIRING
// =============================================================================

pub type TestTransport = AuthenticatedTransport<ScriptedHttp, MemoryStorage, RecordingNavigator>;

/// Everything a transport-level test needs, sharing one storage map.
pub struct Harness {
    pub config: ClientConfig,
    pub storage: MemoryStorage,
    pub http: ScriptedHttp,
    pub navigator: RecordingNavigator,
    pub transport: TestTransport,
}

impl Harness {
    pub fn new(config: ClientConfig) -> Self {
        let storage = MemoryStorage::new();
        let http = ScriptedHttp::new();
        let navigator = RecordingNavigator::at("/index.html");
        let store = SessionStore::from_config(storage.clone(), &config);
        let transport = AuthenticatedTransport::new(http.clone(), store, navigator.clone(), &config);
        Self { config, storage, http, navigator, transport }
    }

    pub fn store(&self) -> SessionStore<MemoryStorage> {
        SessionStore::from_config(self.storage.clone(), &self.config)
    }
}
