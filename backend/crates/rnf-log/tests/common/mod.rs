use chrono::Utc;
use rnf_config::LogShippingConfig;
use rnf_log::shipping::{LogMessage, RequestLog};

pub const ORGANIZATION_ID: &str = "0f4c2a1e-org";
pub const APPLICATION_ID: &str = "9b7d3e5a-app";

/// Shipping config pointing at a mock collector. Timer flushes are pushed far
/// out so tests decide when batches go out.
pub fn shipping_config(api_url: &str, batch_size: usize) -> LogShippingConfig {
    LogShippingConfig {
        organization_id: Some(ORGANIZATION_ID.to_string()),
        application_id: Some(APPLICATION_ID.to_string()),
        api_url: Some(api_url.to_string()),
        batch_size,
        flush_interval_ms: 600_000,
    }
}

pub fn request_log(url: &str, status_code: u16) -> RequestLog {
    RequestLog {
        started_at: Utc::now(),
        method: "GET".to_string(),
        url: url.to_string(),
        status_code,
        duration_ms: 4,
        messages: vec![LogMessage {
            level: "Information".to_string(),
            category: "rnf_server".to_string(),
            message: format!("{url} handled"),
            timestamp: Utc::now(),
        }],
    }
}
