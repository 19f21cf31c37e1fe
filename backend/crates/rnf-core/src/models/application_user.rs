use crate::{CoreError, Result as CoreErrorResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MAX_EMAIL_LENGTH: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationUser {
    pub id: Uuid,
    pub email: String,
    pub normalized_email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email_confirmed: bool,
    pub security_stamp: String,
    pub created_at: DateTime<Utc>,
}

impl ApplicationUser {
    /// Create a new, unconfirmed user. The email is trimmed and validated.
    #[track_caller]
    pub fn new(email: &str, password_hash: String) -> CoreErrorResult<Self> {
        let email = email.trim();
        Self::validate_email(email)?;

        Ok(Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            normalized_email: Self::normalize_email(email),
            password_hash,
            email_confirmed: false,
            security_stamp: Self::new_security_stamp(),
            created_at: Utc::now(),
        })
    }

    /// Lookup key for emails: trimmed and upper-cased.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_uppercase()
    }

    #[track_caller]
    pub fn validate_email(email: &str) -> CoreErrorResult<()> {
        if email.is_empty() {
            return Err(CoreError::validation("email", "email cannot be empty"));
        }
        if email.len() > MAX_EMAIL_LENGTH {
            return Err(CoreError::validation(
                "email",
                format!("email exceeds {MAX_EMAIL_LENGTH} characters"),
            ));
        }

        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(())
            }
            _ => Err(CoreError::validation(
                "email",
                format!("'{email}' is not a valid email address"),
            )),
        }
    }

    pub fn new_security_stamp() -> String {
        Uuid::new_v4().simple().to_string().to_uppercase()
    }

    /// Invalidates every session issued before this call.
    pub fn rotate_security_stamp(&mut self) {
        self.security_stamp = Self::new_security_stamp();
    }
}
