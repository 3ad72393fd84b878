use super::*;

#[test]
fn validate_login_input_trims_username() {
    assert_eq!(
        validate_login_input("  alice  ", "secret1"),
        Ok(Credentials { username: "alice".to_owned(), password: "secret1".to_owned() })
    );
}

#[test]
fn validate_login_input_keeps_password_verbatim() {
    let creds = validate_login_input("alice", " pass with spaces ").unwrap();
    assert_eq!(creds.password, " pass with spaces ");
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "secret1"), Err(MISSING_FIELDS));
    assert_eq!(validate_login_input("alice", ""), Err(MISSING_FIELDS));
}

#[test]
fn validate_login_input_accepts_email_as_username() {
    let creds = validate_login_input("alice@example.com", "secret1").unwrap();
    assert_eq!(creds.username, "alice@example.com");
}
