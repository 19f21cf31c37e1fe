use std::error::Error;
use std::sync::Arc;

/// What the shipping formatter sees for one message.
#[derive(Debug)]
pub struct FormatterArgs<'a> {
    /// The message as it would be shipped without an exception.
    pub default_value: &'a str,
    pub exception: Option<&'a (dyn Error + 'a)>,
}

/// Callback that turns a message (and its exception) into shipped text.
pub type ExceptionFormatter = Arc<dyn Fn(&FormatterArgs<'_>) -> String + Send + Sync>;

/// Default callback: the message alone, or the message, a newline and the
/// formatted exception.
pub fn with_exception(args: &FormatterArgs<'_>) -> String {
    match args.exception {
        None => args.default_value.to_string(),
        Some(exception) => [args.default_value.to_string(), format_exception(exception)].join("\n"),
    }
}

/// Error message followed by its `source()` chain, one cause per line.
pub fn format_exception(exception: &dyn Error) -> String {
    let mut formatted = exception.to_string();
    let mut source = exception.source();

    while let Some(cause) = source {
        formatted.push_str("\nCaused by: ");
        formatted.push_str(&cause.to_string());
        source = cause.source();
    }

    formatted
}
