use crate::Result as AuthErrorResult;

use rnf_config::IdentityConfig;
use rnf_core::{ApplicationUser, UserInfo};
use rnf_db::{SessionRepository, UserRepository};

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use sqlx::SqlitePool;

/// Who is behind a request.
#[derive(Debug, Clone)]
pub enum AuthenticationState {
    Anonymous,
    Authenticated {
        user: ApplicationUser,
        user_info: UserInfo,
        session_token: String,
    },
}

impl AuthenticationState {
    pub fn user_info(&self) -> Option<&UserInfo> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user_info, .. } => Some(user_info),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Resolves a session cookie into an [`AuthenticationState`].
///
/// Every `revalidation_interval` the session's security stamp is compared
/// with the user's current one; a mismatch (password change, forced
/// sign-out) ends the session.
pub struct AuthenticationStateProvider {
    users: UserRepository,
    sessions: SessionRepository,
    revalidation_interval: Duration,
}

impl AuthenticationStateProvider {
    pub fn new(pool: SqlitePool, config: &IdentityConfig) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
            revalidation_interval: Duration::minutes(config.revalidation_interval_minutes),
        }
    }

    pub fn revalidation_interval(&self) -> Duration {
        self.revalidation_interval
    }

    pub async fn get_authentication_state(
        &self,
        session_token: Option<&str>,
    ) -> AuthErrorResult<AuthenticationState> {
        self.get_authentication_state_at(session_token, Utc::now())
            .await
    }

    /// Same as [`Self::get_authentication_state`] at a caller-supplied time.
    pub async fn get_authentication_state_at(
        &self,
        session_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthErrorResult<AuthenticationState> {
        let Some(token) = session_token else {
            return Ok(AuthenticationState::Anonymous);
        };

        let Some(session) = self.sessions.find(token).await? else {
            debug!("Unknown session token");
            return Ok(AuthenticationState::Anonymous);
        };

        if session.is_expired(now) {
            debug!("Session for user {} expired", session.user_id);
            self.sessions.delete(token).await?;
            return Ok(AuthenticationState::Anonymous);
        }

        let Some(user) = self.users.find_by_id(session.user_id).await? else {
            self.sessions.delete(token).await?;
            return Ok(AuthenticationState::Anonymous);
        };

        if session.needs_revalidation(now, self.revalidation_interval) {
            if user.security_stamp != session.security_stamp {
                info!(
                    "Session for user {} failed revalidation, signing out",
                    user.id
                );
                self.sessions.delete(token).await?;
                return Ok(AuthenticationState::Anonymous);
            }

            self.sessions.mark_validated(token, now).await?;
        }

        Ok(AuthenticationState::Authenticated {
            user_info: UserInfo::from(&user),
            user,
            session_token: token.to_string(),
        })
    }
}
