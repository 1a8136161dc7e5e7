use super::*;

#[test]
fn auth_failures_are_grouped() {
    assert!(ClientError::InvalidCredentials("bad creds".to_owned()).is_auth_failure());
    assert!(ClientError::Unauthorized.is_auth_failure());
    assert!(!ClientError::Transport("refused".to_owned()).is_auth_failure());
    assert!(!ClientError::Application("nope".to_owned()).is_auth_failure());
}

#[test]
fn user_message_passes_backend_text_through() {
    assert_eq!(ClientError::InvalidCredentials("bad creds".to_owned()).user_message(), "bad creds");
    assert_eq!(ClientError::Application("Absence introuvable".to_owned()).user_message(), "Absence introuvable");
}

#[test]
fn user_message_describes_transport_failures() {
    assert_eq!(
        ClientError::Transport("connection refused".to_owned()).user_message(),
        "transport error: connection refused"
    );
}

#[test]
fn config_error_names_field() {
    let err = ConfigError::Invalid { field: "api_base_url", reason: "must not be empty".to_owned() };
    assert_eq!(err.to_string(), "invalid config field `api_base_url`: must not be empty");
}
