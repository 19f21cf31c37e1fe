use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// A signed-in browser session, keyed by the opaque cookie token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    /// Security stamp of the user at sign-in (or at the last revalidation)
    pub security_stamp: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub validated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, user_id: Uuid, security_stamp: String, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            security_stamp,
            created_at: now,
            expires_at: now + lifetime,
            validated_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn needs_revalidation(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        now - self.validated_at >= interval
    }
}
