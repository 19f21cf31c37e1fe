pub mod console;
pub mod error;
pub mod scopes;
pub mod shipping;
pub mod structured;

mod csv_formatter_options;
mod csv_log_formatter;
mod event_id;
mod log_entry;
mod log_level;
mod options_monitor;

#[cfg(test)]
mod tests;

pub use csv_formatter_options::CsvFormatterOptions;
pub use csv_log_formatter::CsvLogFormatter;
pub use error::{LogError, Result as LogErrorResult};
pub use event_id::EventId;
pub use log_entry::{LogEntry, MessageFormatter};
pub use log_level::LogLevel;
pub use options_monitor::{ChangeSubscription, OptionsMonitor};
pub use rnf_config::ColorBehavior;

const DEFAULT_LIST_SEPARATOR: &str = ",";
const SCOPE_JOINER: &str = "|";
