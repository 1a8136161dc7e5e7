//! Raw HTTP seam under the authenticated transport.
//!
//! Client-side (hydrate): real `fetch` calls via `gloo-net`.
//! Host builds and tests supply their own [`HttpClient`].
//!
//! ERROR HANDLING
//! ==============
//! Any HTTP status, including 4xx/5xx, is a successful exchange here. Only
//! failures that produce no response at all become [`ClientError::Transport`].

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::de::DeserializeOwned;

use crate::error::ClientError;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Methods whose requests default to a JSON content type.
    #[must_use]
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Serialize `value` as the body and mark it JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] if `value` cannot be serialized.
    pub fn with_json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, ClientError> {
        let body = serde_json::to_string(value).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.body = Some(body);
        self.set_header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        Ok(self)
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Replace any existing header of the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// 2xx, same as `fetch`'s `response.ok`.
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] with the status when the body does not
    /// match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|e| ClientError::Decode(format!("status {}: {e}", self.status)))
    }
}

/// One request/response exchange with no auth handling of its own.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// `fetch`-backed client.
///
/// Requests are unbounded unless a timeout was configured, in which case a
/// request still pending at the deadline fails as a transport error.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooHttpClient {
    timeout: Option<std::time::Duration>,
}

#[cfg(feature = "hydrate")]
impl GlooHttpClient {
    #[must_use]
    pub fn new(timeout: Option<std::time::Duration>) -> Self {
        Self { timeout }
    }

    async fn fetch(request: HttpRequest) -> Result<HttpResponse, ClientError> {
        use gloo_net::http::{Method as GlooMethod, RequestBuilder};

        let method = match request.method {
            Method::Get => GlooMethod::GET,
            Method::Post => GlooMethod::POST,
            Method::Put => GlooMethod::PUT,
            Method::Patch => GlooMethod::PATCH,
            Method::Delete => GlooMethod::DELETE,
        };
        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ClientError::Transport(e.to_string()))?;

        let resp = built.send().await.map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl HttpClient for GlooHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        use futures::future::{Either, select};

        let Some(timeout) = self.timeout else {
            return Self::fetch(request).await;
        };
        let url = request.url.clone();
        let fetch = Box::pin(Self::fetch(request));
        let deadline = Box::pin(gloo_timers::future::sleep(timeout));
        match select(fetch, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ClientError::Transport(format!(
                "request to {url} timed out after {}ms",
                timeout.as_millis()
            ))),
        }
    }
}
