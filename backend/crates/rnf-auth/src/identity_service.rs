use crate::{
    AuthError, EmailSender, PasswordHasher, Result as AuthErrorResult, generate_token,
    tokens_match,
};

use rnf_config::IdentityConfig;
use rnf_core::{ApplicationUser, Session, TokenPurpose, UserToken};
use rnf_db::{DbError, SessionRepository, UserRepository, UserTokenRepository};

use std::panic::Location;
use std::sync::Arc;

use chrono::{Duration, Utc};
use error_location::ErrorLocation;
use log::{info, warn};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user_id: Uuid,
    /// The user must confirm their email before signing in.
    pub requires_confirmation: bool,
}

/// A new session and the user it belongs to.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub session: Session,
    pub user: ApplicationUser,
}

/// Account management: registration, email confirmation, sign-in and sign-out.
pub struct IdentityService {
    pool: SqlitePool,
    users: UserRepository,
    sessions: SessionRepository,
    tokens: UserTokenRepository,
    hasher: Arc<dyn PasswordHasher>,
    email_sender: Arc<dyn EmailSender>,
    config: IdentityConfig,
}

impl IdentityService {
    pub fn new(
        pool: SqlitePool,
        hasher: Arc<dyn PasswordHasher>,
        email_sender: Arc<dyn EmailSender>,
        config: IdentityConfig,
    ) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            tokens: UserTokenRepository::new(pool.clone()),
            pool,
            hasher,
            email_sender,
            config,
        }
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    /// Create an unconfirmed account and email it a confirmation link.
    ///
    /// `confirm_url` is the absolute URL of the confirmation endpoint; the
    /// user id and code are appended as query parameters.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_url: &str,
    ) -> AuthErrorResult<Registration> {
        self.validate_password(password)?;
        ApplicationUser::validate_email(email.trim())?;

        let password_hash = self.hash_password(password).await?;
        let user = ApplicationUser::new(email, password_hash)?;
        self.users.create(&user).await?;
        info!("User {} created a new account with password", user.id);

        let code = generate_token();
        let token = UserToken::new(
            user.id,
            TokenPurpose::EmailConfirmation,
            code.clone(),
            Duration::hours(self.config.confirmation_token_lifetime_hours),
        );
        self.tokens.upsert(&token).await?;

        let link = format!("{confirm_url}?userId={}&code={code}", user.id);
        self.email_sender
            .send_confirmation_link(&user.email, &link)
            .await?;

        Ok(Registration {
            user_id: user.id,
            requires_confirmation: self.config.require_confirmed_account,
        })
    }

    /// Consume a confirmation code and mark the user's email confirmed.
    pub async fn confirm_email(&self, user_id: Uuid, code: &str) -> AuthErrorResult<()> {
        let location = ErrorLocation::from(Location::caller());

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let Some(token) =
            UserTokenRepository::take_in(&mut *tx, user_id, TokenPurpose::EmailConfirmation)
                .await?
        else {
            return Err(AuthError::InvalidToken {
                message: String::from("no pending confirmation"),
                location,
            });
        };

        // Returning before commit rolls the take back, so a wrong code does
        // not burn the pending token.
        if !tokens_match(code, &token.token) {
            return Err(AuthError::InvalidToken {
                message: String::from("confirmation code does not match"),
                location,
            });
        }

        if token.is_expired(Utc::now()) {
            tx.commit().await.map_err(DbError::from)?;
            return Err(AuthError::InvalidToken {
                message: String::from("confirmation code expired"),
                location,
            });
        }

        if !UserRepository::confirm_email_in(&mut *tx, user_id).await? {
            return Err(AuthError::InvalidToken {
                message: String::from("user no longer exists"),
                location,
            });
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("User {user_id} confirmed their email");
        Ok(())
    }

    /// Check the password and open a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthErrorResult<SignIn> {
        let normalized = ApplicationUser::normalize_email(email);

        let Some(user) = self.users.find_by_normalized_email(&normalized).await? else {
            warn!("Sign-in failed: unknown email");
            return Err(AuthError::invalid_credentials());
        };

        if !self.verify_password(password, &user.password_hash).await? {
            warn!("Sign-in failed for user {}: wrong password", user.id);
            return Err(AuthError::invalid_credentials());
        }

        if self.config.require_confirmed_account && !user.email_confirmed {
            warn!("Sign-in refused for user {}: email not confirmed", user.id);
            return Err(AuthError::EmailNotConfirmed {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let session = Session::new(
            generate_token(),
            user.id,
            user.security_stamp.clone(),
            Duration::hours(self.config.session_lifetime_hours),
        );
        self.sessions.create(&session).await?;
        info!("User {} logged in", user.id);

        Ok(SignIn { session, user })
    }

    pub async fn sign_out(&self, session_token: &str) -> AuthErrorResult<()> {
        if self.sessions.delete(session_token).await? {
            info!("User logged out");
        }
        Ok(())
    }

    /// Replace the password and rotate the security stamp, which makes every
    /// other session fail its next revalidation.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AuthErrorResult<()> {
        self.validate_password(new_password)?;

        let Some(mut user) = self.users.find_by_id(user_id).await? else {
            return Err(AuthError::invalid_credentials());
        };

        if !self
            .verify_password(current_password, &user.password_hash)
            .await?
        {
            return Err(AuthError::invalid_credentials());
        }

        let password_hash = self.hash_password(new_password).await?;
        user.rotate_security_stamp();
        if !self
            .users
            .update_credentials(user.id, &password_hash, &user.security_stamp)
            .await?
        {
            return Err(AuthError::invalid_credentials());
        }

        info!("User {user_id} changed their password");
        Ok(())
    }

    #[track_caller]
    fn validate_password(&self, password: &str) -> AuthErrorResult<()> {
        if password.chars().count() < self.config.password_min_length {
            return Err(AuthError::validation(
                "password",
                format!(
                    "password must be at least {} characters",
                    self.config.password_min_length
                ),
            ));
        }
        Ok(())
    }

    async fn hash_password(&self, password: &str) -> AuthErrorResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal {
                message: format!("password hashing task failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> AuthErrorResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal {
                message: format!("password verification task failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?
    }
}
