use crate::Result as AuthErrorResult;

use async_trait::async_trait;
use log::debug;

/// Delivers account emails.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_confirmation_link(&self, email: &str, confirmation_link: &str)
    -> AuthErrorResult<()>;
}

/// Sends nothing. Stands in until a real email service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEmailSender;

#[async_trait]
impl EmailSender for NoOpEmailSender {
    async fn send_confirmation_link(
        &self,
        email: &str,
        confirmation_link: &str,
    ) -> AuthErrorResult<()> {
        debug!("Not sending confirmation email to {email}: {confirmation_link}");
        Ok(())
    }
}
