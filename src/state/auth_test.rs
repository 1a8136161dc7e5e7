use super::*;

// =============================================================
// AuthPhase
// =============================================================

#[test]
fn auth_phase_default_is_anonymous() {
    assert_eq!(AuthPhase::default(), AuthPhase::Anonymous);
}

#[test]
fn derive_covers_all_phases() {
    assert_eq!(AuthPhase::derive(false, false), AuthPhase::Anonymous);
    assert_eq!(AuthPhase::derive(true, false), AuthPhase::Authenticated);
    assert_eq!(AuthPhase::derive(false, true), AuthPhase::Authenticating);
    assert_eq!(AuthPhase::derive(true, true), AuthPhase::Authenticating);
}

#[test]
fn only_authenticated_phase_is_signed_in() {
    assert!(AuthPhase::Authenticated.is_authenticated());
    assert!(!AuthPhase::Authenticating.is_authenticated());
    assert!(!AuthPhase::Anonymous.is_authenticated());
}

// =============================================================
// Login redirect
// =============================================================

#[test]
fn anonymous_off_login_page_redirects() {
    assert!(should_redirect_to_login(AuthPhase::Anonymous, "/app/absences.html", "login.html"));
}

#[test]
fn anonymous_on_login_page_stays() {
    assert!(!should_redirect_to_login(AuthPhase::Anonymous, "/app/login.html", "login.html"));
    assert!(!should_redirect_to_login(AuthPhase::Anonymous, "/login.html", "/login.html"));
}

#[test]
fn signed_in_or_pending_never_redirects() {
    assert!(!should_redirect_to_login(AuthPhase::Authenticated, "/index.html", "login.html"));
    assert!(!should_redirect_to_login(AuthPhase::Authenticating, "/index.html", "login.html"));
}
