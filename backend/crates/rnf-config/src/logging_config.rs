use crate::{ConfigErrorResult, ConsoleLoggingConfig, LogLevel};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `[logging]` - the console pipeline and its per-category levels
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Category (log target prefix) to level, e.g. `sqlx = "warn"`
    pub level_overrides: BTreeMap<String, LogLevel>,
    pub console: ConsoleLoggingConfig,
}

impl LoggingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.console.validate()
    }
}
