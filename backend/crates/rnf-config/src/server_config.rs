use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_HTTPS_PORT, DEFAULT_PORT,
    DEFAULT_STATIC_DIR, MIN_PORT,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Redirect plain-HTTP requests (as reported by a proxy) to HTTPS
    pub https_redirection: bool,
    pub https_port: u16,
    /// Directory served as static files, relative to the content root
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            https_redirection: true,
            https_port: DEFAULT_HTTPS_PORT,
            static_dir: String::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign" - OS picks an available port.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.https_redirection && self.https_port == 0 {
            return Err(ConfigError::server(
                "server.https_port cannot be 0 when https_redirection is enabled",
            ));
        }

        if self.static_dir.contains("..") {
            return Err(ConfigError::server(
                "server.static_dir cannot contain '..'",
            ));
        }

        Ok(())
    }
}
