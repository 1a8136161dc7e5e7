//! Authenticated request wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every domain call goes through [`AuthenticatedTransport::request`]. It
//! attaches the stored bearer token, defaults JSON content type on
//! body-bearing methods, and owns the reaction to HTTP 401.
//!
//! DESIGN
//! ======
//! On 401 the transport clears the whole session (the same four keys
//! `logout` clears) and navigates to the login page right away. The 401
//! response is still returned, so a caller that ignores the status simply
//! sees a denial. Network failures are logged and returned as
//! [`ClientError::Transport`], which keeps them apart from HTTP-level
//! denials.
//!
//! TRADE-OFFS
//! ==========
//! Requests are not serialized against each other. A 401 clearing the
//! session while a login is writing its token can leave either state
//! behind; single-tab use makes this rare and it is left visible.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use super::http::{AUTHORIZATION, CONTENT_TYPE, HttpClient, HttpRequest, HttpResponse, JSON_CONTENT_TYPE, Method};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::state::session::SessionStore;
use crate::state::storage::KeyValueStore;
use crate::util::navigation::Navigator;

/// Per-request options, the `init` half of a `fetch` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::Get)
    }
}

impl RequestOptions {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self { method, headers: Vec::new(), body: None }
    }

    /// Options carrying `value` as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] if `value` cannot be serialized.
    pub fn json<T: serde::Serialize + ?Sized>(method: Method, value: &T) -> Result<Self, ClientError> {
        let body = serde_json::to_string(value).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Self { method, headers: Vec::new(), body: Some(body) })
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_owned(), value.into()));
        self
    }
}

pub struct AuthenticatedTransport<H, S, N> {
    http: H,
    store: SessionStore<S>,
    navigator: N,
    login_page: String,
}

impl<H: Clone, S: Clone, N: Clone> Clone for AuthenticatedTransport<H, S, N> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            store: self.store.clone(),
            navigator: self.navigator.clone(),
            login_page: self.login_page.clone(),
        }
    }
}

impl<H, S, N> AuthenticatedTransport<H, S, N>
where
    H: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(http: H, store: SessionStore<S>, navigator: N, config: &ClientConfig) -> Self {
        Self { http, store, navigator, login_page: config.login_page.clone() }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    #[must_use]
    pub fn login_page(&self) -> &str {
        &self.login_page
    }

    /// Build the outgoing request: caller headers, then the bearer token if
    /// one is stored, then a JSON content type when a body-bearing method
    /// has none.
    #[must_use]
    pub fn prepare(&self, url: &str, options: RequestOptions) -> HttpRequest {
        let mut request = HttpRequest::new(options.method, url);
        for (name, value) in options.headers {
            request.set_header(&name, value);
        }
        request.body = options.body;

        if let Some(token) = self.store.token() {
            request.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if request.method.carries_body() && request.header(CONTENT_TYPE).is_none() {
            request.set_header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        }
        request
    }

    /// Send an authenticated request.
    ///
    /// A 401 clears the session and redirects to the login page, then the
    /// 401 response is returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response was received.
    pub async fn request(&self, url: &str, options: RequestOptions) -> Result<HttpResponse, ClientError> {
        let request = self.prepare(url, options);
        let method = request.method;
        log::debug!("{} {url}", method.as_str());

        let response = match self.http.send(request).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("network error on {} {url}: {err}", method.as_str());
                return Err(match err {
                    ClientError::Transport(_) => err,
                    other => ClientError::Transport(other.to_string()),
                });
            }
        };

        if response.is_unauthorized() {
            self.expire_session();
        }
        Ok(response)
    }

    fn expire_session(&self) {
        log::warn!("session expired or unauthorized; returning to {}", self.login_page);
        self.store.clear();
        self.navigator.navigate(&self.login_page);
    }
}
