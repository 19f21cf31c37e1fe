use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_STRUCTURED_LOG_DIRECTORY,
    DEFAULT_STRUCTURED_LOG_FILE_PREFIX, LogLevel,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuredLogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuredLogRotation {
    #[default]
    Daily,
    Hourly,
    Never,
}

/// `[structured_logging]` - the tracing pipeline (request spans, framework events)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StructuredLoggingConfig {
    pub enabled: bool,
    pub level: LogLevel,
    pub format: StructuredLogFormat,
    /// Log directory relative to the content root. Unset = stderr.
    pub directory: Option<String>,
    pub file_prefix: String,
    pub rotation: StructuredLogRotation,
}

impl Default for StructuredLoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::default(),
            format: StructuredLogFormat::default(),
            directory: Some(String::from(DEFAULT_STRUCTURED_LOG_DIRECTORY)),
            file_prefix: String::from(DEFAULT_STRUCTURED_LOG_FILE_PREFIX),
            rotation: StructuredLogRotation::default(),
        }
    }
}

impl StructuredLoggingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.directory.is_some() && self.file_prefix.trim().is_empty() {
            return Err(ConfigError::logging(
                "structured_logging.file_prefix cannot be empty when a directory is set",
            ));
        }

        if let Some(ref dir) = self.directory
            && dir.contains("..")
        {
            return Err(ConfigError::logging(
                "structured_logging.directory cannot contain '..'",
            ));
        }

        Ok(())
    }
}
