use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CONFIRMATION_TOKEN_LIFETIME_HOURS, DEFAULT_COOKIE_NAME,
    DEFAULT_PASSWORD_MIN_LENGTH, DEFAULT_REQUIRE_CONFIRMED_ACCOUNT,
    DEFAULT_REVALIDATION_INTERVAL_MINUTES, DEFAULT_SESSION_LIFETIME_HOURS,
    MAX_CONFIRMATION_TOKEN_LIFETIME_HOURS, MAX_REVALIDATION_INTERVAL_MINUTES,
    MAX_SESSION_LIFETIME_HOURS,
};

use serde::{Deserialize, Serialize};

/// `[identity]` - cookie authentication and account rules
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub require_confirmed_account: bool,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub session_lifetime_hours: i64,
    /// How often a session's security stamp is re-checked
    pub revalidation_interval_minutes: i64,
    pub password_min_length: usize,
    pub confirmation_token_lifetime_hours: i64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            require_confirmed_account: DEFAULT_REQUIRE_CONFIRMED_ACCOUNT,
            cookie_name: String::from(DEFAULT_COOKIE_NAME),
            cookie_secure: true,
            session_lifetime_hours: DEFAULT_SESSION_LIFETIME_HOURS,
            revalidation_interval_minutes: DEFAULT_REVALIDATION_INTERVAL_MINUTES,
            password_min_length: DEFAULT_PASSWORD_MIN_LENGTH,
            confirmation_token_lifetime_hours: DEFAULT_CONFIRMATION_TOKEN_LIFETIME_HOURS,
        }
    }
}

impl IdentityConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.cookie_name.trim().is_empty() {
            return Err(ConfigError::identity("identity.cookie_name cannot be empty"));
        }

        if !(1..=MAX_SESSION_LIFETIME_HOURS).contains(&self.session_lifetime_hours) {
            return Err(ConfigError::identity(format!(
                "identity.session_lifetime_hours must be between 1 and {}, got {}",
                MAX_SESSION_LIFETIME_HOURS, self.session_lifetime_hours
            )));
        }

        if !(1..=MAX_REVALIDATION_INTERVAL_MINUTES)
            .contains(&self.revalidation_interval_minutes)
        {
            return Err(ConfigError::identity(format!(
                "identity.revalidation_interval_minutes must be between 1 and {}, got {}",
                MAX_REVALIDATION_INTERVAL_MINUTES, self.revalidation_interval_minutes
            )));
        }

        if self.password_min_length < 1 {
            return Err(ConfigError::identity(
                "identity.password_min_length must be >= 1",
            ));
        }

        if !(1..=MAX_CONFIRMATION_TOKEN_LIFETIME_HOURS)
            .contains(&self.confirmation_token_lifetime_hours)
        {
            return Err(ConfigError::identity(format!(
                "identity.confirmation_token_lifetime_hours must be between 1 and {}, got {}",
                MAX_CONFIRMATION_TOKEN_LIFETIME_HOURS, self.confirmation_token_lifetime_hours
            )));
        }

        Ok(())
    }
}
