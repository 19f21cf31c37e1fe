use crate::{ApplicationUser, CoreError};

use googletest::prelude::*;

#[test]
fn given_valid_email_when_new_then_user_is_unconfirmed_with_normalized_email() {
    let user = ApplicationUser::new("  Alice@Example.com ", "hash".to_string()).unwrap();

    assert_that!(user.email.as_str(), eq("Alice@Example.com"));
    assert_that!(user.normalized_email.as_str(), eq("ALICE@EXAMPLE.COM"));
    assert_that!(user.email_confirmed, eq(false));
    assert_that!(user.security_stamp.len(), eq(32));
}

#[test]
fn given_email_without_at_sign_when_new_then_validation_error_on_email_field() {
    let result = ApplicationUser::new("not-an-email", "hash".to_string());

    let Err(CoreError::Validation { field, .. }) = result else {
        panic!("expected validation error");
    };
    assert_eq!(field.as_deref(), Some("email"));
}

#[test]
fn given_invalid_emails_when_validated_then_all_rejected() {
    for email in ["", "@example.com", "alice@", "a@b@c"] {
        assert_that!(ApplicationUser::validate_email(email), err(anything()));
    }
}

#[test]
fn given_overlong_email_when_validated_then_rejected() {
    let email = format!("{}@example.com", "a".repeat(260));

    let result = ApplicationUser::validate_email(&email);

    assert_that!(result, err(displays_as(contains_substring("exceeds"))));
}

#[test]
fn given_user_when_rotating_security_stamp_then_stamp_changes() {
    let mut user = ApplicationUser::new("bob@example.com", "hash".to_string()).unwrap();
    let before = user.security_stamp.clone();

    user.rotate_security_stamp();

    assert_that!(user.security_stamp, not(eq(&before)));
}

#[test]
fn given_user_when_serialized_then_password_hash_is_omitted() {
    let user = ApplicationUser::new("carol@example.com", "secret-hash".to_string()).unwrap();

    let json = serde_json::to_string(&user).unwrap();

    assert_that!(json, not(contains_substring("secret-hash")));
}
