//! Per-request log shipping to a remote collector.
//!
//! While a request runs, log records are captured into a task-local buffer.
//! When it finishes, the buffer, the request line and the outcome become one
//! [`RequestLog`] that the [`LogShipper`] posts in batches.

mod capture;
mod exception_formatter;
mod request_log;
mod shipper;

pub use capture::{RequestCapture, capture_record};
pub use exception_formatter::{ExceptionFormatter, FormatterArgs, format_exception, with_exception};
pub use request_log::{LogMessage, RequestLog, RequestLogBatch};
pub use shipper::{LogShipper, REQUEST_LOGS_PATH, shipping_client};
