mod console;
mod scopes;

use crate::{EventId, LogEntry, LogLevel};

use std::error::Error;
use std::io;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone};
use tracing_subscriber::fmt::MakeWriter;

pub(crate) const CATEGORY: &str = "ReturnNotFound.Pages.Home";

/// In-memory sink that can be handed out and read back
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub(crate) fn render_str(state: &&str, _exception: Option<&dyn Error>) -> Option<String> {
    Some(state.to_string())
}

pub(crate) fn render_none(_state: &(), _exception: Option<&dyn Error>) -> Option<String> {
    None
}

pub(crate) fn render_with_exception(
    state: &&str,
    exception: Option<&dyn Error>,
) -> Option<String> {
    match exception {
        Some(e) => Some(format!("{state}: {e}")),
        None => Some(state.to_string()),
    }
}

/// Information entry in [`CATEGORY`] with event id 7
pub(crate) fn entry(message: &str) -> LogEntry<'_, &str> {
    LogEntry::new(
        LogLevel::Information,
        CATEGORY,
        EventId::new(7),
        message,
        render_str,
    )
}

pub(crate) fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).single().unwrap()
}
