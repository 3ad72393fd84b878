use super::*;

fn user(username: &str, email: &str) -> User {
    User { id: "u-1".to_owned(), username: username.to_owned(), email: email.to_owned(), ..User::default() }
}

#[test]
fn display_name_prefers_username() {
    assert_eq!(display_name(Some(&user("alice", "alice@example.com"))), "alice");
}

#[test]
fn display_name_falls_back_to_email() {
    assert_eq!(display_name(Some(&user("", "alice@example.com"))), "alice@example.com");
}

#[test]
fn display_name_without_profile_uses_generic_label() {
    assert_eq!(display_name(None), "Signed in");
    assert_eq!(display_name(Some(&user("", ""))), "Signed in");
}
