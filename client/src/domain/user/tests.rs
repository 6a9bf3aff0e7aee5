//! Tests for the user model and its persisted form.

use super::*;
use rstest::rstest;
use serde_json::json;

fn user(id: u64, email: &str, role: UserRole) -> User {
    User::new(UserId::new(id), Email::new(email).expect("valid email"), role)
}

#[rstest]
#[case("alice@company.io", UserRole::Company)]
#[case("hiring@bigcompany.com", UserRole::Company)]
#[case("alice@acme.io", UserRole::Candidate)]
#[case("COMPANY@acme.io", UserRole::Candidate)]
fn role_follows_email_substring(#[case] email: &str, #[case] expected: UserRole) {
    let email = Email::new(email).expect("valid email");
    assert_eq!(UserRole::from_email(&email), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_email_is_rejected(#[case] raw: &str) {
    assert_eq!(Email::new(raw), Err(UserValidationError::EmptyEmail));
}

#[rstest]
#[case("candidate", UserRole::Candidate)]
#[case("Company", UserRole::Company)]
#[case(" company ", UserRole::Company)]
fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: UserRole) {
    assert_eq!(raw.parse::<UserRole>(), Ok(expected));
}

#[rstest]
fn unknown_role_is_rejected() {
    let err = "recruiter".parse::<UserRole>().expect_err("unknown role");
    assert!(matches!(err, UserValidationError::UnknownRole { .. }));
}

#[rstest]
fn persisted_layout_matches_session_slot() {
    let value = serde_json::to_value(user(7, "ada@company.io", UserRole::Company))
        .expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": 7, "email": "ada@company.io", "type": "company" })
    );
}

#[rstest]
fn persisted_record_parses_back() {
    let raw = r#"{"id":1700000000000,"email":"ada@acme.io","type":"candidate"}"#;
    let parsed: User = serde_json::from_str(raw).expect("parse user");
    assert_eq!(parsed, user(1_700_000_000_000, "ada@acme.io", UserRole::Candidate));
}

#[rstest]
#[case(r#"{"id":1,"email":"  ","type":"candidate"}"#)]
#[case(r#"{"id":1,"email":"ada@acme.io","type":"recruiter"}"#)]
#[case(r#"{"id":"one","email":"ada@acme.io","type":"candidate"}"#)]
#[case(r#"{"email":"ada@acme.io","type":"candidate"}"#)]
fn invalid_records_fail_to_parse(#[case] raw: &str) {
    assert!(serde_json::from_str::<User>(raw).is_err());
}
