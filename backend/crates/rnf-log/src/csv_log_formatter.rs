use crate::{ChangeSubscription, CsvFormatterOptions, LogEntry, OptionsMonitor};

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Local};
use log::debug;

/// Writes log entries as one delimited line each:
///
/// ```text
/// ["<timestamp>",]"<Level>","<Category>[<EventId>]","<scope|scope>","<message>"
/// ```
///
/// Fields are quoted but never escaped; a quote or separator inside a
/// message ends up verbatim in the line.
pub struct CsvLogFormatter {
    options: Arc<RwLock<Arc<CsvFormatterOptions>>>,
    subscription: Mutex<ChangeSubscription>,
}

impl CsvLogFormatter {
    pub const NAME: &'static str = "CsvFormatter";

    /// Take the monitor's current options and follow its changes until disposed.
    pub fn new(monitor: &OptionsMonitor<CsvFormatterOptions>) -> Self {
        let options = Arc::new(RwLock::new(monitor.current_value()));

        let held = Arc::clone(&options);
        let subscription = monitor.on_change(move |snapshot| {
            *held.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
        });

        Self {
            options,
            subscription: Mutex::new(subscription),
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// The snapshot the next write will use.
    pub fn options(&self) -> Arc<CsvFormatterOptions> {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn write<S>(
        &self,
        entry: &LogEntry<'_, S>,
        scopes: Option<&[String]>,
        sink: &mut dyn Write,
    ) -> io::Result<()> {
        self.write_at(entry, scopes, sink, Local::now())
    }

    /// Same as [`CsvLogFormatter::write`] with the timestamp supplied by the caller.
    pub fn write_at<S>(
        &self,
        entry: &LogEntry<'_, S>,
        scopes: Option<&[String]>,
        sink: &mut dyn Write,
        now: DateTime<Local>,
    ) -> io::Result<()> {
        let message = match entry.render() {
            Some(message) if !message.is_empty() => message,
            _ => return Ok(()),
        };

        // One snapshot per line, even if a reload lands mid-write.
        let options = self.options();
        let separator = options.separator();
        let scopes = options.join_scopes(scopes);

        let mut line = String::with_capacity(message.len() + 64);

        if let Some(ref format) = options.timestamp_format {
            write!(line, "\"{}\"{separator}", now.format(format)).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid timestamp format '{format}'"),
                )
            })?;
        }

        writeln!(
            line,
            "\"{level}\"{separator}\"{category}[{event_id}]\"{separator}\"{scopes}\"{separator}\"{message}\"",
            level = entry.level,
            category = entry.category,
            event_id = entry.event_id,
        )
        .map_err(|e| io::Error::other(e.to_string()))?;

        sink.write_all(line.as_bytes())
    }

    /// Stop following option changes. Only the first call does anything.
    pub fn dispose(&self) -> bool {
        let released = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .dispose();

        if released {
            debug!("{} released its options subscription", Self::NAME);
        }

        released
    }

    pub fn is_disposed(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_disposed()
    }
}
