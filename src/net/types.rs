//! Wire DTOs for the authentication and absences backends.
//!
//! DESIGN
//! ======
//! Field names mirror the backend JSON (camelCase, French domain terms) so
//! serde round-trips stay lossless. Dates and times stay as the ISO strings
//! the backend sends; the client only displays them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::state::session::Session;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Identity of the bearer, from `GET /auth/profile`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Numeric on the wire; kept as text because storage is string-valued.
    #[serde(deserialize_with = "deserialize_id_string")]
    pub id: String,
    pub nom_utilisateur: String,
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub actif: Option<bool>,
}

impl Profile {
    /// Session fields a profile load overwrites. The token is left alone.
    #[must_use]
    pub fn to_session(&self) -> Session {
        Session {
            user_id: Some(self.id.clone()),
            user_name: Some(self.nom_utilisateur.clone()),
            role: Some(self.role.clone()),
            token: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Absence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub employe_id: i64,
    pub type_absence_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_absence_nom: Option<String>,
    /// `YYYY-MM-DD`.
    pub date_absence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heure_debut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heure_fin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duree_heures: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motif: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justifiee: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_justificatif: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enregistre_par: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceType {
    pub id: i64,
    pub nom: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub justification_requise: Option<bool>,
}

/// Body of `PUT /absences/{id}/justifier`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Justification<'a> {
    pub document_path: &'a str,
}

/// Notification categories emitted by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Absence,
    CongeApprouve,
    CongeRejete,
    DemandeConge,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub destinataire_id: Option<i64>,
    #[serde(default)]
    pub expediteur_id: Option<i64>,
    /// Raw category; see [`Notification::kind`].
    #[serde(rename = "type")]
    pub kind_tag: String,
    #[serde(default)]
    pub sujet: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reference_id: Option<i64>,
    #[serde(default)]
    pub type_reference: Option<String>,
    #[serde(default)]
    pub lue: bool,
    #[serde(default)]
    pub date_envoi: Option<String>,
    #[serde(default)]
    pub date_lecture: Option<String>,
    #[serde(default)]
    pub recente: Option<bool>,
}

impl Notification {
    /// Parsed category, `None` for tags this client does not know.
    #[must_use]
    pub fn kind(&self) -> Option<NotificationKind> {
        serde_json::from_value(serde_json::Value::String(self.kind_tag.clone())).ok()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    pub total: i64,
    pub non_lues: i64,
    pub lues: i64,
}

fn deserialize_id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}
