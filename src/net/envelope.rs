//! `{ success, message, data }` response envelope used by the absences backend.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::http::HttpResponse;
use crate::error::{APPLICATION_ERROR_FALLBACK, ClientError};

#[derive(Clone, Debug, PartialEq)]
pub enum Envelope<T> {
    Success { message: Option<String>, data: Option<T> },
    Failure { message: String },
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    success: bool,
    message: Option<String>,
    data: Option<T>,
}

impl<T> From<RawEnvelope<T>> for Envelope<T> {
    fn from(raw: RawEnvelope<T>) -> Self {
        if raw.success {
            Self::Success { message: raw.message, data: raw.data }
        } else {
            Self::Failure {
                message: raw
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| APPLICATION_ERROR_FALLBACK.to_owned()),
            }
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode an envelope from a transport response.
    ///
    /// A 401 here has already been handled by the transport, so it maps to
    /// [`ClientError::Unauthorized`] regardless of the body. Other statuses
    /// are decoded as envelopes, since the backend reports business errors
    /// with 4xx/5xx plus an envelope body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] for 401 and
    /// [`ClientError::Decode`] for a body that is not an envelope.
    pub fn from_response(response: &HttpResponse) -> Result<Self, ClientError> {
        if response.is_unauthorized() {
            return Err(ClientError::Unauthorized);
        }
        response.json::<RawEnvelope<T>>().map(Self::from)
    }
}

impl<T> Envelope<T> {
    /// Payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Application`] for a failure envelope and
    /// [`ClientError::Decode`] for a success envelope with no data.
    pub fn into_data(self) -> Result<T, ClientError> {
        match self {
            Self::Success { data: Some(data), .. } => Ok(data),
            Self::Success { data: None, .. } => Err(ClientError::Decode("envelope has no data".to_owned())),
            Self::Failure { message } => Err(ClientError::Application(message)),
        }
    }

    /// Success check for calls whose payload is irrelevant (deletes).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Application`] for a failure envelope.
    pub fn into_unit(self) -> Result<(), ClientError> {
        match self {
            Self::Success { .. } => Ok(()),
            Self::Failure { message } => Err(ClientError::Application(message)),
        }
    }
}
