//! Error types shared by the transport, auth and domain API layers.
//!
//! ERROR HANDLING
//! ==============
//! `Unauthorized` is resolved centrally by the authenticated transport
//! (session clear + login redirect) before it reaches a caller, so call
//! sites only need to surface it, never recover from it.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message used when the backend rejects credentials without a body.
pub const INVALID_CREDENTIALS_FALLBACK: &str = "Identifiants incorrects";

/// Message used when an envelope reports failure without a message.
pub const APPLICATION_ERROR_FALLBACK: &str = "request failed";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The login endpoint answered with a non-success status.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// An authenticated call came back with HTTP 401.
    #[error("session expired or unauthorized")]
    Unauthorized,

    /// The request never produced an HTTP response (DNS, refused, aborted, timed out).
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend envelope reported `success: false`.
    #[error("{0}")]
    Application(String),

    /// A response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether this error means the caller is not (or no longer) signed in.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::InvalidCredentials(_) | Self::Unauthorized)
    }

    /// Text suitable for an error alert.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials(message) | Self::Application(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
