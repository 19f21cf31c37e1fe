//! Per-request log shipping
//!
//! Captures every record logged while the request is handled, plus the error
//! behind an error response, and queues them on the shipper as one request log.

use crate::{AppState, ErrorDetail};

use rnf_log::LogLevel;
use rnf_log::shipping::{LogMessage, RequestCapture, RequestLog};

use std::error::Error;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

const ERROR_CATEGORY: &str = "rnf_server::api";

pub async fn ship_request_logs(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(shipper) = state.shipper.clone() else {
        return next.run(request).await;
    };

    let started_at = Utc::now();
    let timer = Instant::now();
    let method = request.method().to_string();
    let url = request.uri().to_string();

    let capture = RequestCapture::new();
    let response = capture.run(next.run(request)).await;

    let mut messages = capture.take();
    if let Some(detail) = response.extensions().get::<ErrorDetail>() {
        let default_value = format!("{method} {url} failed with {}", detail.status.as_u16());
        messages.push(LogMessage {
            level: LogLevel::Error.to_string(),
            category: ERROR_CATEGORY.to_string(),
            message: shipper.format(&default_value, Some(detail as &dyn Error)),
            timestamp: Utc::now(),
        });
    }

    shipper.ship(RequestLog {
        started_at,
        method,
        url,
        status_code: response.status().as_u16(),
        duration_ms: u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX),
        messages,
    });

    response
}
