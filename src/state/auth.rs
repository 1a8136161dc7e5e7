//! Sign-in phase for the current browser context.
//!
//! SYSTEM CONTEXT
//! ==============
//! The phase is never stored. On page load it is derived from the session
//! store; while a login exchange is outstanding the gateway reports
//! `Authenticating`. A 401 clears storage, which is all it takes to fall
//! back to `Anonymous`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

impl AuthPhase {
    /// Derive the phase from the store predicate and the login-in-flight flag.
    #[must_use]
    pub fn derive(is_authenticated: bool, login_in_flight: bool) -> Self {
        if login_in_flight {
            Self::Authenticating
        } else if is_authenticated {
            Self::Authenticated
        } else {
            Self::Anonymous
        }
    }

    #[must_use]
    pub fn is_authenticated(self) -> bool {
        self == Self::Authenticated
    }
}

/// Whether a page at `path` must bounce to the login page for this phase.
#[must_use]
pub fn should_redirect_to_login(phase: AuthPhase, path: &str, login_page: &str) -> bool {
    if phase != AuthPhase::Anonymous {
        return false;
    }
    let login_name = login_page.trim_start_matches('/');
    login_name.is_empty() || !path.contains(login_name)
}
