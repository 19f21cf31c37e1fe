use crate::TokenPurpose;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Single-use token bound to a user and a purpose (e.g. email confirmation).
#[derive(Debug, Clone)]
pub struct UserToken {
    pub user_id: Uuid,
    pub purpose: TokenPurpose,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl UserToken {
    pub fn new(user_id: Uuid, purpose: TokenPurpose, token: String, lifetime: Duration) -> Self {
        Self {
            user_id,
            purpose,
            token,
            expires_at: Utc::now() + lifetime,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
