use crate::{
    ConfigError, ConfigErrorResult, ConnectionStrings, HostEnvironment, IdentityConfig,
    LogShippingConfig, LoggingConfig, ServerConfig, StructuredLoggingConfig,
};

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub connection_strings: ConnectionStrings,
    pub logging: LoggingConfig,
    pub structured_logging: StructuredLoggingConfig,
    pub log_shipping: LogShippingConfig,
    pub identity: IdentityConfig,
}

impl Config {
    /// Load config from every source of the given environment.
    ///
    /// Loading order (later sources win):
    /// 1. `appsettings.toml` in the content root, if it exists
    /// 2. `appsettings.<Environment>.toml`, if it exists
    /// 3. RNF_* environment variable overrides
    /// 4. Development only: the user secrets file, if it exists
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load(environment: &HostEnvironment) -> ConfigErrorResult<Self> {
        let mut settings = toml::Table::new();

        for path in [
            environment.base_settings_path(),
            environment.environment_settings_path(),
        ] {
            if let Some(layer) = Self::read_layer(&path)? {
                merge_tables(&mut settings, layer);
            }
        }

        let mut config = Self::from_table(settings)?;
        config.apply_env_overrides();

        if environment.is_development()
            && let Some(secrets_path) = environment.secrets_path()
            && let Some(secrets) = Self::read_layer(&secrets_path)?
        {
            config = config.with_layer(secrets)?;
        }

        Ok(config)
    }

    /// Read one optional TOML source. A missing file is not an error.
    fn read_layer(path: &Path) -> ConfigErrorResult<Option<toml::Table>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str::<toml::Table>(&contents)
            .map(Some)
            .map_err(|e| ConfigError::Toml {
                path: path.to_path_buf(),
                source: e,
            })
    }

    fn from_table(table: toml::Table) -> ConfigErrorResult<Self> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::serde(e.to_string()))
    }

    /// Overlay a partial settings table on top of this config.
    fn with_layer(self, layer: toml::Table) -> ConfigErrorResult<Self> {
        let toml::Value::Table(mut current) =
            toml::Value::try_from(&self).map_err(|e| ConfigError::serde(e.to_string()))?
        else {
            return Err(ConfigError::serde("config did not serialize to a table"));
        };

        merge_tables(&mut current, layer);
        Self::from_table(current)
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.logging.validate()?;
        self.structured_logging.validate()?;
        self.log_shipping.validate()?;
        self.identity.validate()?;
        self.default_connection()?;

        Ok(())
    }

    /// The `DefaultConnection` connection string. Missing is fatal at startup.
    #[track_caller]
    pub fn default_connection(&self) -> ConfigErrorResult<&str> {
        match self.connection_strings.default_connection.as_deref() {
            Some(connection) if !connection.trim().is_empty() => Ok(connection),
            _ => Err(ConfigError::connection_string(
                "Connection string 'DefaultConnection' not found.",
            )),
        }
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (https redirection: {}, static: {})",
            self.server.host,
            self.server.port,
            self.server.https_redirection,
            self.server.static_dir
        );
        info!(
            "  connection_strings.default_connection: {}",
            if self.connection_strings.default_connection.is_some() {
                "set"
            } else {
                "missing"
            }
        );
        info!(
            "  logging: {} via {:?} formatter ({} overrides)",
            *self.logging.level,
            self.logging.console.formatter,
            self.logging.level_overrides.len()
        );
        info!(
            "  structured_logging: {} ({:?}, {})",
            if self.structured_logging.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.structured_logging.format,
            self.structured_logging
                .directory
                .as_deref()
                .unwrap_or("stderr")
        );
        info!(
            "  log_shipping: {}",
            if self.log_shipping.is_enabled() {
                "enabled"
            } else {
                "disabled"
            }
        );
        info!(
            "  identity: confirmed accounts {}, session {}h, revalidate every {}m",
            if self.identity.require_confirmed_account {
                "required"
            } else {
                "optional"
            },
            self.identity.session_lifetime_hours,
            self.identity.revalidation_interval_minutes
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("RNF_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("RNF_SERVER_PORT", &mut self.server.port);
        Self::apply_env_bool(
            "RNF_SERVER_HTTPS_REDIRECTION",
            &mut self.server.https_redirection,
        );
        Self::apply_env_parse("RNF_SERVER_HTTPS_PORT", &mut self.server.https_port);
        Self::apply_env_string("RNF_SERVER_STATIC_DIR", &mut self.server.static_dir);

        // Connection strings
        Self::apply_env_option_string(
            "RNF_CONNECTION_STRING",
            &mut self.connection_strings.default_connection,
        );

        // Console logging
        Self::apply_env_parse("RNF_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_option_string(
            "RNF_LOG_LIST_SEPARATOR",
            &mut self.logging.console.list_separator,
        );
        Self::apply_env_option_string(
            "RNF_LOG_TIMESTAMP_FORMAT",
            &mut self.logging.console.timestamp_format,
        );
        Self::apply_env_bool(
            "RNF_LOG_INCLUDE_SCOPES",
            &mut self.logging.console.include_scopes,
        );

        // Structured logging
        Self::apply_env_bool(
            "RNF_STRUCTURED_LOG_ENABLED",
            &mut self.structured_logging.enabled,
        );
        Self::apply_env_parse(
            "RNF_STRUCTURED_LOG_LEVEL",
            &mut self.structured_logging.level,
        );
        Self::apply_env_option_string(
            "RNF_STRUCTURED_LOG_DIR",
            &mut self.structured_logging.directory,
        );

        // Log shipping
        Self::apply_env_option_string(
            "RNF_LOG_SHIPPING_ORGANIZATION_ID",
            &mut self.log_shipping.organization_id,
        );
        Self::apply_env_option_string(
            "RNF_LOG_SHIPPING_APPLICATION_ID",
            &mut self.log_shipping.application_id,
        );
        Self::apply_env_option_string(
            "RNF_LOG_SHIPPING_API_URL",
            &mut self.log_shipping.api_url,
        );

        // Identity
        Self::apply_env_bool(
            "RNF_IDENTITY_REQUIRE_CONFIRMED_ACCOUNT",
            &mut self.identity.require_confirmed_account,
        );
        Self::apply_env_bool(
            "RNF_IDENTITY_COOKIE_SECURE",
            &mut self.identity.cookie_secure,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

/// Deep-merge `overlay` into `base`; tables merge key by key, anything else replaces.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        let replacement = match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
                None
            }
            (_, value) => Some(value),
        };

        if let Some(value) = replacement {
            base.insert(key, value);
        }
    }
}
