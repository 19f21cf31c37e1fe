use rnf_auth::{EmailSender, IdentityService, PasswordHasher, Result as AuthErrorResult};
use rnf_config::IdentityConfig;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

pub const CONFIRM_URL: &str = "https://localhost/Account/ConfirmEmail";
pub const PASSWORD: &str = "Pa55word!";

/// Reversible stand-in for Argon2 so service tests stay fast
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, password: &str) -> AuthErrorResult<String> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> AuthErrorResult<bool> {
        Ok(hash.strip_prefix("plain$") == Some(password))
    }
}

/// Records every confirmation link instead of sending it
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingEmailSender {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// The `code` query parameter of the most recent link
    pub fn last_code(&self) -> String {
        let (_, link) = self.sent().pop().expect("no email sent");
        link.split("code=").nth(1).expect("link has no code").to_string()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_confirmation_link(
        &self,
        email: &str,
        confirmation_link: &str,
    ) -> AuthErrorResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), confirmation_link.to_string()));
        Ok(())
    }
}

pub fn identity_config(require_confirmed_account: bool) -> IdentityConfig {
    IdentityConfig {
        require_confirmed_account,
        ..IdentityConfig::default()
    }
}

pub fn create_service(
    pool: &SqlitePool,
    config: IdentityConfig,
) -> (IdentityService, Arc<RecordingEmailSender>) {
    let sender = Arc::new(RecordingEmailSender::default());
    let service = IdentityService::new(
        pool.clone(),
        Arc::new(PlainTextHasher),
        sender.clone(),
        config,
    );
    (service, sender)
}

/// Registers and confirms an account, returning its id
pub async fn register_confirmed(
    service: &IdentityService,
    sender: &RecordingEmailSender,
    email: &str,
) -> Uuid {
    let registration = service
        .register(email, PASSWORD, CONFIRM_URL)
        .await
        .expect("registration failed");
    service
        .confirm_email(registration.user_id, &sender.last_code())
        .await
        .expect("confirmation failed");
    registration.user_id
}
