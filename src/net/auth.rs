//! Login, profile and logout exchanges.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login posts credentials straight through the raw HTTP client: a 401 there
//! means "wrong password", not "session expired", and must not trigger the
//! transport's clear-and-redirect. Everything after the token is stored goes
//! through the authenticated transport.
//!
//! ERROR HANDLING
//! ==============
//! Login failures are logged and returned. The profile fetch that follows a
//! successful login is best-effort: its failures are logged and swallowed,
//! since the login itself already succeeded.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::Cell;
use std::rc::Rc;

use super::http::{HttpClient, HttpRequest};
use super::transport::{AuthenticatedTransport, RequestOptions};
use super::types::{LoginRequest, LoginResponse, Profile};
use crate::config::ClientConfig;
use crate::error::{ClientError, INVALID_CREDENTIALS_FALLBACK};
use crate::state::auth::AuthPhase;
use crate::state::session::{Session, SessionStore};
use crate::state::storage::KeyValueStore;
use crate::util::navigation::Navigator;

pub const LOGIN_PATH: &str = "/auth/login";
pub const PROFILE_PATH: &str = "/auth/profile";

pub struct AuthGateway<H, S, N> {
    transport: AuthenticatedTransport<H, S, N>,
    login_url: String,
    profile_url: String,
    login_in_flight: Rc<Cell<bool>>,
}

impl<H: Clone, S: Clone, N: Clone> Clone for AuthGateway<H, S, N> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            login_url: self.login_url.clone(),
            profile_url: self.profile_url.clone(),
            login_in_flight: self.login_in_flight.clone(),
        }
    }
}

/// Resets the in-flight flag even if the login future is dropped midway.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn start(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<H, S, N> AuthGateway<H, S, N>
where
    H: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(transport: AuthenticatedTransport<H, S, N>, config: &ClientConfig) -> Self {
        Self {
            transport,
            login_url: config.endpoint(LOGIN_PATH),
            profile_url: config.endpoint(PROFILE_PATH),
            login_in_flight: Rc::new(Cell::new(false)),
        }
    }

    pub fn transport(&self) -> &AuthenticatedTransport<H, S, N> {
        &self.transport
    }

    fn store(&self) -> &SessionStore<S> {
        self.transport.store()
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        AuthPhase::derive(self.store().is_authenticated(), self.login_in_flight.get())
    }

    /// Exchange credentials for a token, store it, then load the profile.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidCredentials`] for a non-2xx login response,
    ///   carrying the response text or a generic fallback.
    /// - [`ClientError::Transport`] when the login request got no response.
    /// - [`ClientError::Decode`] when a 2xx response has no token.
    ///
    /// The session is untouched on every error path.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let token = {
            let _in_flight = InFlight::start(&self.login_in_flight);
            self.exchange_credentials(username, password)
                .await
                .inspect_err(|err| log::error!("login failed for {username}: {err}"))?
        };
        self.store().write(&Session::with_token(token));
        log::info!("login succeeded for {username}");
        self.load_profile().await;
        Ok(())
    }

    async fn exchange_credentials(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let request = HttpRequest::post(&self.login_url).with_json(&LoginRequest { username, password })?;
        let response = self.transport.http().send(request).await?;
        if !response.ok() {
            let text = response.text();
            let message = if text.is_empty() { INVALID_CREDENTIALS_FALLBACK } else { text };
            return Err(ClientError::InvalidCredentials(message.to_owned()));
        }
        let body: LoginResponse = response.json()?;
        Ok(body.token)
    }

    /// Fetch the bearer's profile and store id, name and role.
    ///
    /// Best-effort: every failure is logged and yields `None`.
    pub async fn load_profile(&self) -> Option<Session> {
        let response = match self.transport.request(&self.profile_url, RequestOptions::default()).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("profile load failed: {err}");
                return None;
            }
        };
        if !response.ok() {
            log::error!("profile load failed: status {}", response.status);
            return None;
        }
        let profile: Profile = match response.json() {
            Ok(profile) => profile,
            Err(err) => {
                log::error!("profile load failed: {err}");
                return None;
            }
        };
        self.store().write(&profile.to_session());
        Some(self.store().get())
    }

    /// Clear the session and go to the login page. Safe to repeat.
    pub fn logout(&self) {
        log::info!("logging out");
        self.store().clear();
        self.transport.navigator().navigate(self.transport.login_page());
    }
}
