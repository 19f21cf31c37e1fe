use rnf_core::{ApplicationUser, Session};
use rnf_db::UserRepository;

use chrono::Duration;
use sqlx::SqlitePool;

pub const TEST_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g";

pub fn create_test_user(email: &str) -> ApplicationUser {
    ApplicationUser::new(email, TEST_PASSWORD_HASH.to_string()).unwrap()
}

/// Inserts a user so sessions and tokens can reference it
pub async fn insert_test_user(pool: &SqlitePool, email: &str) -> ApplicationUser {
    let user = create_test_user(email);
    UserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("Failed to insert test user");
    user
}

pub fn create_test_session(user: &ApplicationUser, token: &str) -> Session {
    Session::new(
        token.to_string(),
        user.id,
        user.security_stamp.clone(),
        Duration::hours(1),
    )
}
