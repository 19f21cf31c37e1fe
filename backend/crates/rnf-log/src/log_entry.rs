use crate::{EventId, LogLevel};

use std::error::Error;
use std::fmt;

/// Renders an entry's state (and exception, if any) into the message text.
pub type MessageFormatter<S> = fn(&S, Option<&dyn Error>) -> Option<String>;

/// One log event as handed to a formatter.
///
/// The message is not rendered up front; formatters call [`LogEntry::render`]
/// so that a `None` or empty message can be dropped without allocating a line.
pub struct LogEntry<'a, S> {
    pub level: LogLevel,
    pub category: &'a str,
    pub event_id: EventId,
    pub exception: Option<&'a dyn Error>,
    pub state: S,
    pub formatter: MessageFormatter<S>,
}

impl<'a, S> LogEntry<'a, S> {
    pub fn new(
        level: LogLevel,
        category: &'a str,
        event_id: EventId,
        state: S,
        formatter: MessageFormatter<S>,
    ) -> Self {
        Self {
            level,
            category,
            event_id,
            exception: None,
            state,
            formatter,
        }
    }

    pub fn with_exception(mut self, exception: &'a dyn Error) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn render(&self) -> Option<String> {
        (self.formatter)(&self.state, self.exception)
    }
}

impl<'a> LogEntry<'a, &'a fmt::Arguments<'a>> {
    /// Wrap a `log` record. Records carry no event id, so it is always `0`.
    pub fn from_record(record: &'a log::Record<'_>) -> Self {
        LogEntry::new(
            LogLevel::from(record.level()),
            record.target(),
            EventId::default(),
            record.args(),
            render_arguments,
        )
    }
}

fn render_arguments(args: &&fmt::Arguments<'_>, _exception: Option<&dyn Error>) -> Option<String> {
    Some(args.to_string())
}
