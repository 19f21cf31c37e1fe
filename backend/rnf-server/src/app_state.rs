use rnf_auth::{
    Argon2Hasher, AuthenticationStateProvider, EmailSender, IdentityService, NoOpEmailSender,
};
use rnf_config::{Config, HostEnvironment, ServerConfig};
use rnf_log::shipping::LogShipper;

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub identity: Arc<IdentityService>,
    pub auth_state: Arc<AuthenticationStateProvider>,
    /// `None` when log shipping is not configured
    pub shipper: Option<LogShipper>,
    pub environment: HostEnvironment,
    pub server: ServerConfig,
}

impl AppState {
    /// Production wiring: Argon2 hashing and the no-op email sender.
    pub fn new(
        pool: SqlitePool,
        config: &Config,
        environment: HostEnvironment,
        shipper: Option<LogShipper>,
    ) -> Self {
        let email_sender: Arc<dyn EmailSender> = Arc::new(NoOpEmailSender);
        let identity = IdentityService::new(
            pool.clone(),
            Arc::new(Argon2Hasher::new()),
            email_sender,
            config.identity.clone(),
        );
        let auth_state = AuthenticationStateProvider::new(pool.clone(), &config.identity);

        Self {
            pool,
            identity: Arc::new(identity),
            auth_state: Arc::new(auth_state),
            shipper,
            environment,
            server: config.server.clone(),
        }
    }

    pub fn static_dir(&self) -> PathBuf {
        self.environment.content_root.join(&self.server.static_dir)
    }
}
