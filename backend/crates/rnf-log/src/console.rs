use crate::error::{LogError, Result as LogErrorResult};
use crate::{CsvLogFormatter, LogEntry, scopes, shipping};

use std::io::{IsTerminal, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, Output};
use log::info;
use rnf_config::{ColorBehavior, ConsoleFormatterKind, LoggingConfig};

/// Install the console pipeline as the global `log` logger.
///
/// # Arguments
/// * `logging` - level, per-category overrides and console formatter options
/// * `formatter` - CSV formatter, used when `logging.console.formatter` is `csv`
/// * `capture_requests` - also feed records into the log-shipping request buffer
#[track_caller]
pub fn initialize(
    logging: &LoggingConfig,
    formatter: Arc<CsvLogFormatter>,
    capture_requests: bool,
) -> LogErrorResult<()> {
    build_dispatch(logging, formatter, std::io::stdout(), capture_requests)
        .apply()
        .map_err(|e| LogError::init("console", e.to_string()))?;

    info!(
        "Logger initialized: level={}, formatter={:?}, {} override(s)",
        *logging.level,
        logging.console.formatter,
        logging.level_overrides.len()
    );

    Ok(())
}

/// Build the console dispatch without installing it.
pub fn build_dispatch<W>(
    logging: &LoggingConfig,
    formatter: Arc<CsvLogFormatter>,
    sink: W,
    capture_requests: bool,
) -> Dispatch
where
    W: Write + Send + 'static,
{
    let mut dispatch = Dispatch::new().level(*logging.level);
    for (category, level) in &logging.level_overrides {
        dispatch = dispatch.level_for(category.clone(), **level);
    }

    let console = match logging.console.formatter {
        ConsoleFormatterKind::Csv => Dispatch::new().chain(csv_output(formatter, sink)),
        ConsoleFormatterKind::Simple => {
            simple_dispatch(use_colors(logging.console.color_behavior), sink)
        }
    };
    dispatch = dispatch.chain(console);

    if capture_requests {
        dispatch = dispatch.chain(Output::call(shipping::capture_record));
    }

    dispatch
}

/// Route records through the CSV formatter, with the task's ambient scopes.
pub fn csv_output<W>(formatter: Arc<CsvLogFormatter>, sink: W) -> Output
where
    W: Write + Send + 'static,
{
    let sink = Mutex::new(sink);

    Output::call(move |record| {
        let entry = LogEntry::from_record(record);
        let scopes = scopes::current();
        let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);

        if let Err(e) = formatter
            .write(&entry, Some(scopes.as_slice()), &mut *sink)
            .and_then(|()| sink.flush())
        {
            eprintln!("{}: failed to write log record: {e}", CsvLogFormatter::NAME);
        }
    })
}

fn simple_dispatch<W>(colored: bool, sink: W) -> Dispatch
where
    W: Write + Send + 'static,
{
    let sink: Box<dyn Write + Send> = Box::new(sink);

    if colored {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{target}]",
                    date = humantime::format_rfc3339(SystemTime::now()),
                    level = colors.color(record.level()),
                    message = message,
                    target = record.target(),
                ))
            })
            .chain(sink)
    } else {
        Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{target}]",
                    date = humantime::format_rfc3339(SystemTime::now()),
                    level = record.level(),
                    message = message,
                    target = record.target(),
                ))
            })
            .chain(sink)
    }
}

fn use_colors(behavior: ColorBehavior) -> bool {
    match behavior {
        ColorBehavior::Enabled => true,
        ColorBehavior::Disabled => false,
        ColorBehavior::Default => std::io::stdout().is_terminal(),
    }
}
