//! REST helpers for the absences/notifications backend.
//!
//! Every call goes through [`AuthenticatedTransport`], so the bearer token
//! and the 401 handling apply uniformly. Payloads arrive wrapped in an
//! [`Envelope`].
//!
//! ERROR HANDLING
//! ==============
//! Failures are logged with the operation name and returned to the caller
//! unchanged. A failure envelope becomes [`ClientError::Application`]
//! carrying the backend message.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::envelope::Envelope;
use super::http::{HttpClient, Method};
use super::transport::{AuthenticatedTransport, RequestOptions};
use super::types::{Absence, AbsenceType, Justification, Notification, NotificationStats};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::state::storage::KeyValueStore;
use crate::util::navigation::Navigator;

// =============================================================================
// ENDPOINTS
// =============================================================================

const ABSENCES_PATH: &str = "/absences";
const NOTIFICATIONS_PATH: &str = "/notifications";

fn absence_endpoint(id: i64) -> String {
    format!("{ABSENCES_PATH}/{id}")
}

fn employee_absences_endpoint(employe_id: i64) -> String {
    format!("{ABSENCES_PATH}/employe/{employe_id}")
}

fn period_absences_endpoint(debut: &str, fin: &str) -> String {
    format!("{ABSENCES_PATH}/periode?debut={debut}&fin={fin}")
}

fn unjustified_absences_endpoint() -> String {
    format!("{ABSENCES_PATH}/non-justifiees")
}

fn justify_absence_endpoint(id: i64) -> String {
    format!("{ABSENCES_PATH}/{id}/justifier")
}

fn absence_types_endpoint() -> String {
    format!("{ABSENCES_PATH}/types")
}

fn user_notifications_endpoint(user_id: &str) -> String {
    format!("{NOTIFICATIONS_PATH}?userId={user_id}")
}

fn unread_notifications_endpoint(user_id: &str) -> String {
    format!("{NOTIFICATIONS_PATH}/non-lues?userId={user_id}")
}

fn unread_count_endpoint(user_id: &str) -> String {
    format!("{NOTIFICATIONS_PATH}/count-non-lues?userId={user_id}")
}

fn notification_endpoint(id: i64) -> String {
    format!("{NOTIFICATIONS_PATH}/{id}")
}

fn mark_read_endpoint(id: i64) -> String {
    format!("{NOTIFICATIONS_PATH}/{id}/lire")
}

fn mark_all_read_endpoint(user_id: &str) -> String {
    format!("{NOTIFICATIONS_PATH}/tout-lire?userId={user_id}")
}

fn statistics_endpoint(user_id: &str) -> String {
    format!("{NOTIFICATIONS_PATH}/statistiques?userId={user_id}")
}

// =============================================================================
// SHARED CALL PATH
// =============================================================================

struct ApiCaller<H, S, N> {
    transport: AuthenticatedTransport<H, S, N>,
    config: ClientConfig,
}

impl<H: Clone, S: Clone, N: Clone> Clone for ApiCaller<H, S, N> {
    fn clone(&self) -> Self {
        Self { transport: self.transport.clone(), config: self.config.clone() }
    }
}

impl<H, S, N> ApiCaller<H, S, N>
where
    H: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    async fn envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Envelope<T>, ClientError> {
        let url = self.config.endpoint(path);
        let response = self.transport.request(&url, options).await?;
        Envelope::from_response(&response)
    }

    async fn data<T: DeserializeOwned>(&self, what: &str, path: &str, options: RequestOptions) -> Result<T, ClientError> {
        self.envelope(path, options)
            .await
            .and_then(Envelope::into_data)
            .inspect_err(|err| log::error!("{what} failed: {err}"))
    }

    async fn unit(&self, what: &str, path: &str, options: RequestOptions) -> Result<(), ClientError> {
        self.envelope::<serde_json::Value>(path, options)
            .await
            .and_then(Envelope::into_unit)
            .inspect_err(|err| log::error!("{what} failed: {err}"))
    }

    async fn get<T: DeserializeOwned>(&self, what: &str, path: &str) -> Result<T, ClientError> {
        self.data(what, path, RequestOptions::default()).await
    }

    async fn send<B, T>(&self, what: &str, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::json(method, body).inspect_err(|err| log::error!("{what} failed: {err}"))?;
        self.data(what, path, options).await
    }
}

// =============================================================================
// ABSENCES
// =============================================================================

pub struct AbsenceApi<H, S, N> {
    caller: ApiCaller<H, S, N>,
}

impl<H: Clone, S: Clone, N: Clone> Clone for AbsenceApi<H, S, N> {
    fn clone(&self) -> Self {
        Self { caller: self.caller.clone() }
    }
}

impl<H, S, N> AbsenceApi<H, S, N>
where
    H: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(transport: AuthenticatedTransport<H, S, N>, config: &ClientConfig) -> Self {
        Self { caller: ApiCaller { transport, config: config.clone() } }
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn list(&self) -> Result<Vec<Absence>, ClientError> {
        self.caller.get("list absences", ABSENCES_PATH).await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn list_for_employee(&self, employe_id: i64) -> Result<Vec<Absence>, ClientError> {
        self.caller.get("list employee absences", &employee_absences_endpoint(employe_id)).await
    }

    /// Absences between two `YYYY-MM-DD` dates, inclusive.
    ///
    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn list_in_period(&self, debut: &str, fin: &str) -> Result<Vec<Absence>, ClientError> {
        self.caller.get("list absences in period", &period_absences_endpoint(debut, fin)).await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn list_unjustified(&self) -> Result<Vec<Absence>, ClientError> {
        self.caller.get("list unjustified absences", &unjustified_absences_endpoint()).await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn create(&self, absence: &Absence) -> Result<Absence, ClientError> {
        self.caller.send("create absence", Method::Post, ABSENCES_PATH, absence).await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn update(&self, id: i64, absence: &Absence) -> Result<Absence, ClientError> {
        self.caller.send("update absence", Method::Put, &absence_endpoint(id), absence).await
    }

    /// Attach a supporting document and mark the absence justified.
    ///
    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn justify(&self, id: i64, document_path: &str) -> Result<Absence, ClientError> {
        let body = Justification { document_path };
        self.caller.send("justify absence", Method::Put, &justify_absence_endpoint(id), &body).await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.caller
            .unit("delete absence", &absence_endpoint(id), RequestOptions::new(Method::Delete))
            .await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn types(&self) -> Result<Vec<AbsenceType>, ClientError> {
        self.caller.get("list absence types", &absence_types_endpoint()).await
    }
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

pub struct NotificationApi<H, S, N> {
    caller: ApiCaller<H, S, N>,
}

impl<H: Clone, S: Clone, N: Clone> Clone for NotificationApi<H, S, N> {
    fn clone(&self) -> Self {
        Self { caller: self.caller.clone() }
    }
}

impl<H, S, N> NotificationApi<H, S, N>
where
    H: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(transport: AuthenticatedTransport<H, S, N>, config: &ClientConfig) -> Self {
        Self { caller: ApiCaller { transport, config: config.clone() } }
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Notification>, ClientError> {
        self.caller.get("list notifications", &user_notifications_endpoint(user_id)).await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn unread(&self, user_id: &str) -> Result<Vec<Notification>, ClientError> {
        self.caller.get("list unread notifications", &unread_notifications_endpoint(user_id)).await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn count_unread(&self, user_id: &str) -> Result<u64, ClientError> {
        self.caller.get("count unread notifications", &unread_count_endpoint(user_id)).await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn mark_read(&self, id: i64) -> Result<Notification, ClientError> {
        self.caller
            .data("mark notification read", &mark_read_endpoint(id), RequestOptions::new(Method::Put))
            .await
    }

    /// Returns how many notifications were marked.
    ///
    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn mark_all_read(&self, user_id: &str) -> Result<u64, ClientError> {
        self.caller
            .data("mark all notifications read", &mark_all_read_endpoint(user_id), RequestOptions::new(Method::Put))
            .await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.caller
            .unit("delete notification", &notification_endpoint(id), RequestOptions::new(Method::Delete))
            .await
    }

    /// # Errors
    ///
    /// Transport, decode or application failure; see the module docs.
    pub async fn statistics(&self, user_id: &str) -> Result<NotificationStats, ClientError> {
        self.caller.get("load notification statistics", &statistics_endpoint(user_id)).await
    }
}
