use super::*;

// =============================================================
// Profile
// =============================================================

#[test]
fn profile_accepts_numeric_id() {
    let profile: Profile =
        serde_json::from_str(r#"{"id":4,"nomUtilisateur":"Aminata Sow","role":"EMPLOYE","email":"a.sow@example.test","actif":true}"#)
            .unwrap();
    assert_eq!(profile.id, "4");
    assert_eq!(profile.nom_utilisateur, "Aminata Sow");
    assert_eq!(profile.email.as_deref(), Some("a.sow@example.test"));
}

#[test]
fn profile_accepts_string_id() {
    let profile: Profile =
        serde_json::from_str(r#"{"id":"4","nomUtilisateur":"Aminata Sow","role":"EMPLOYE"}"#).unwrap();
    assert_eq!(profile.id, "4");
    assert_eq!(profile.actif, None);
}

#[test]
fn profile_rejects_object_id() {
    let err = serde_json::from_str::<Profile>(r#"{"id":{},"nomUtilisateur":"x","role":"ADMIN"}"#).unwrap_err();
    assert!(err.to_string().contains("expected string or number id"));
}

#[test]
fn profile_to_session_leaves_token_untouched() {
    let profile = Profile {
        id: "4".to_owned(),
        nom_utilisateur: "Aminata Sow".to_owned(),
        role: "EMPLOYE".to_owned(),
        email: None,
        actif: None,
    };
    let session = profile.to_session();
    assert_eq!(session.user_id.as_deref(), Some("4"));
    assert_eq!(session.role.as_deref(), Some("EMPLOYE"));
    assert_eq!(session.token, None);
}

// =============================================================
// Absences
// =============================================================

#[test]
fn new_absence_serializes_without_server_fields() {
    let absence = Absence {
        employe_id: 4,
        type_absence_id: 2,
        date_absence: "2026-03-12".to_owned(),
        motif: Some("Rendez-vous médical".to_owned()),
        ..Absence::default()
    };
    let json = serde_json::to_value(&absence).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "employeId": 4,
            "typeAbsenceId": 2,
            "dateAbsence": "2026-03-12",
            "motif": "Rendez-vous médical"
        })
    );
}

#[test]
fn absence_deserializes_backend_payload() {
    let absence: Absence = serde_json::from_str(
        r#"{"id":11,"employeId":4,"typeAbsenceId":2,"typeAbsenceNom":"Maladie","dateAbsence":"2026-03-12",
            "heureDebut":"08:00:00","heureFin":"12:00:00","dureeHeures":4.0,"motif":null,"justifiee":false,
            "documentJustificatif":null,"enregistrePar":1,"statut":"EN_ATTENTE","dateCreation":"2026-03-12T09:15:00"}"#,
    )
    .unwrap();
    assert_eq!(absence.id, Some(11));
    assert_eq!(absence.type_absence_nom.as_deref(), Some("Maladie"));
    assert_eq!(absence.duree_heures, Some(4.0));
    assert_eq!(absence.justifiee, Some(false));
    assert_eq!(absence.motif, None);
}

#[test]
fn justification_body_uses_camel_case() {
    let body = serde_json::to_string(&Justification { document_path: "/docs/certif.pdf" }).unwrap();
    assert_eq!(body, r#"{"documentPath":"/docs/certif.pdf"}"#);
}

// =============================================================
// Notifications
// =============================================================

#[test]
fn notification_kind_parses_known_tags() {
    let notification: Notification =
        serde_json::from_str(r#"{"id":1,"type":"CONGE_APPROUVE","sujet":"Congé","lue":false}"#).unwrap();
    assert_eq!(notification.kind(), Some(NotificationKind::CongeApprouve));
    assert!(!notification.lue);
}

#[test]
fn notification_kind_unknown_tag_is_none() {
    let notification: Notification = serde_json::from_str(r#"{"id":2,"type":"RAPPEL"}"#).unwrap();
    assert_eq!(notification.kind(), None);
    assert_eq!(notification.kind_tag, "RAPPEL");
}

#[test]
fn notification_stats_deserialize() {
    let stats: NotificationStats = serde_json::from_str(r#"{"total":12,"nonLues":3,"lues":9}"#).unwrap();
    assert_eq!(stats, NotificationStats { total: 12, non_lues: 3, lues: 9 });
}
