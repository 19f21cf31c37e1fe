use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMessage {
    pub level: String,
    pub category: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// One handled request and everything it logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLog {
    pub started_at: DateTime<Utc>,
    pub method: String,
    pub url: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub messages: Vec<LogMessage>,
}

/// Wire body posted to the collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLogBatch {
    pub organization_id: String,
    pub application_id: String,
    pub logs: Vec<RequestLog>,
}
