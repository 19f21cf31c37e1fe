use crate::Session;

use chrono::{Duration, Utc};
use uuid::Uuid;

#[test]
fn test_session_new_is_not_expired() {
    let session = Session::new(
        "token".to_string(),
        Uuid::new_v4(),
        "STAMP".to_string(),
        Duration::hours(1),
    );

    assert!(!session.is_expired(Utc::now()));
    assert!(session.is_expired(Utc::now() + Duration::hours(2)));
}

#[test]
fn test_session_needs_revalidation_after_interval() {
    let session = Session::new(
        "token".to_string(),
        Uuid::new_v4(),
        "STAMP".to_string(),
        Duration::hours(1),
    );
    let interval = Duration::minutes(30);

    assert!(!session.needs_revalidation(session.validated_at, interval));
    assert!(session.needs_revalidation(session.validated_at + Duration::minutes(31), interval));
}
