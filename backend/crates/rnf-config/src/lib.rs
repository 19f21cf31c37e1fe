mod config;
mod connection_strings;
mod console_logging_config;
mod error;
mod host_environment;
mod identity_config;
mod log_level;
mod log_shipping_config;
mod logging_config;
mod server_config;
mod structured_logging_config;
mod watcher;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use connection_strings::ConnectionStrings;
pub use console_logging_config::{ColorBehavior, ConsoleFormatterKind, ConsoleLoggingConfig};
pub use error::{ConfigError, ConfigErrorResult};
pub use host_environment::HostEnvironment;
pub use identity_config::IdentityConfig;
pub use log_level::LogLevel;
pub use log_shipping_config::LogShippingConfig;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use structured_logging_config::{
    StructuredLogFormat, StructuredLogRotation, StructuredLoggingConfig,
};
pub use watcher::ConfigWatcher;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const MIN_PORT: u16 = 1024;
const DEFAULT_HTTPS_PORT: u16 = 443;
const DEFAULT_STATIC_DIR: &str = "wwwroot";

const DEFAULT_ENVIRONMENT: &str = "Production";
const DEVELOPMENT_ENVIRONMENT: &str = "Development";
const BASE_SETTINGS_FILE: &str = "appsettings.toml";
const SETTINGS_FILE_PREFIX: &str = "appsettings";
const SETTINGS_FILE_EXTENSION: &str = "toml";
const SECRETS_DIRECTORY: &str = "rnf";
const SECRETS_FILE: &str = "secrets.toml";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

const DEFAULT_STRUCTURED_LOG_DIRECTORY: &str = "logs";
const DEFAULT_STRUCTURED_LOG_FILE_PREFIX: &str = "rnf";

const DEFAULT_SHIPPING_BATCH_SIZE: usize = 50;
const MAX_SHIPPING_BATCH_SIZE: usize = 1000;
const DEFAULT_SHIPPING_FLUSH_INTERVAL_MS: u64 = 2000;

const DEFAULT_REQUIRE_CONFIRMED_ACCOUNT: bool = true;
const DEFAULT_COOKIE_NAME: &str = ".Rnf.Identity";
const DEFAULT_SESSION_LIFETIME_HOURS: i64 = 336;
const DEFAULT_REVALIDATION_INTERVAL_MINUTES: i64 = 30;
const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;
const DEFAULT_CONFIRMATION_TOKEN_LIFETIME_HOURS: i64 = 24;
const MAX_SESSION_LIFETIME_HOURS: i64 = 24 * 365;
const MAX_REVALIDATION_INTERVAL_MINUTES: i64 = 60 * 24 * 30;
const MAX_CONFIRMATION_TOKEN_LIFETIME_HOURS: i64 = 24 * 30;
