use crate::{DEFAULT_LIST_SEPARATOR, SCOPE_JOINER};

use rnf_config::{ColorBehavior, ConsoleLoggingConfig};

/// Options read by [`crate::CsvLogFormatter`] on every write.
///
/// Never mutated in place: a reload builds a new value and the monitor swaps it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvFormatterOptions {
    /// Field separator. `,` when unset.
    pub list_separator: Option<String>,
    /// chrono strftime pattern. No timestamp column when unset.
    pub timestamp_format: Option<String>,
    pub include_scopes: bool,
    pub color_behavior: ColorBehavior,
}

impl CsvFormatterOptions {
    pub fn separator(&self) -> &str {
        self.list_separator
            .as_deref()
            .unwrap_or(DEFAULT_LIST_SEPARATOR)
    }

    /// Scopes joined with `|`; the configured separator is never used here.
    pub fn join_scopes(&self, scopes: Option<&[String]>) -> String {
        match scopes {
            Some(scopes) if self.include_scopes => scopes.join(SCOPE_JOINER),
            _ => String::new(),
        }
    }
}

impl From<&ConsoleLoggingConfig> for CsvFormatterOptions {
    fn from(config: &ConsoleLoggingConfig) -> Self {
        Self {
            list_separator: config.list_separator.clone(),
            timestamp_format: config.timestamp_format.clone(),
            include_scopes: config.include_scopes,
            color_behavior: config.color_behavior,
        }
    }
}
