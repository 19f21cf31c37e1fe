use crate::TokenPurpose;

use std::str::FromStr;

#[test]
fn test_token_purpose_round_trips_through_str() {
    let purpose = TokenPurpose::EmailConfirmation;

    assert_eq!(TokenPurpose::from_str(purpose.as_str()).unwrap(), purpose);
    assert_eq!(purpose.to_string(), "email_confirmation");
}

#[test]
fn test_token_purpose_rejects_unknown_value() {
    let result = TokenPurpose::from_str("password_reset");

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("password_reset"));
}
