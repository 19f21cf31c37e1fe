use super::LogMessage;
use crate::LogLevel;

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

tokio::task_local! {
    static CAPTURE: RequestCapture;
}

/// Log messages recorded while one request was being handled.
#[derive(Debug, Clone, Default)]
pub struct RequestCapture {
    messages: Arc<Mutex<Vec<LogMessage>>>,
}

impl RequestCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `future` with this buffer as the capture target of its task.
    pub async fn run<F: Future>(&self, future: F) -> F::Output {
        CAPTURE.scope(self.clone(), future).await
    }

    pub fn push(&self, message: LogMessage) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }

    /// Drain every captured message, oldest first.
    pub fn take(&self) -> Vec<LogMessage> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `fern` output: append the record to the current request's buffer, if any.
pub fn capture_record(record: &log::Record) {
    let _ = CAPTURE.try_with(|capture| {
        capture.push(LogMessage {
            level: LogLevel::from(record.level()).to_string(),
            category: record.target().to_string(),
            message: record.args().to_string(),
            timestamp: Utc::now(),
        });
    });
}
