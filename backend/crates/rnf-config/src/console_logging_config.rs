use crate::{ConfigError, ConfigErrorResult};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Which console formatter renders log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleFormatterKind {
    #[default]
    Csv,
    Simple,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBehavior {
    /// Color when stdout is a terminal
    #[default]
    Default,
    Enabled,
    Disabled,
}

/// `[logging.console]` - options for the console pipeline
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleLoggingConfig {
    pub formatter: ConsoleFormatterKind,
    /// Field separator for the CSV formatter (`,` when unset)
    pub list_separator: Option<String>,
    /// chrono strftime pattern, e.g. `%Y-%m-%d %H:%M:%S%.3f`
    pub timestamp_format: Option<String>,
    pub include_scopes: bool,
    pub color_behavior: ColorBehavior,
}

impl ConsoleLoggingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(ref format) = self.timestamp_format
            && StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
        {
            return Err(ConfigError::logging(format!(
                "logging.console.timestamp_format '{format}' is not a valid strftime pattern"
            )));
        }

        if let Some(ref separator) = self.list_separator
            && separator.contains(['\r', '\n'])
        {
            return Err(ConfigError::logging(
                "logging.console.list_separator cannot contain line breaks",
            ));
        }

        Ok(())
    }
}
