use crate::{ApplicationUser, UserInfo};

use googletest::prelude::*;

#[test]
fn given_user_when_projected_then_user_info_carries_email_and_id() {
    let user = ApplicationUser::new("dave@example.com", "hash".to_string()).unwrap();

    let info = UserInfo::from(&user);

    assert_that!(info.email.as_str(), eq("dave@example.com"));
    assert_that!(info.user_id, eq(&user.id.to_string()));
}

#[test]
fn given_user_info_when_serialized_then_uses_client_field_names() {
    let info = UserInfo {
        email: "erin@example.com".to_string(),
        user_id: "42".to_string(),
    };

    let json: serde_json::Value = serde_json::to_value(&info).unwrap();

    assert_eq!(json["email"], "erin@example.com");
    assert_eq!(json["userId"], "42");
}
