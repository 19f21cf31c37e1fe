//! Redirects plain-HTTP requests, as reported by a TLS-terminating proxy, to HTTPS.

use crate::AppState;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header, uri::Authority},
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::{debug, warn};

pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";
const DEFAULT_HTTPS_PORT: u16 = 443;

pub async fn redirect_to_https(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.server.https_redirection || !is_forwarded_http(&request) {
        return next.run(request).await;
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let Some(location) =
        host.and_then(|host| https_location(host, state.server.https_port, path_and_query))
    else {
        warn!("Failed to determine the https redirect target, serving over http");
        return next.run(request).await;
    };

    match HeaderValue::from_str(&location) {
        Ok(value) => {
            debug!("Redirecting to {location}");
            (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, value)]).into_response()
        }
        Err(e) => {
            warn!("Invalid https redirect target {location}: {e}");
            next.run(request).await
        }
    }
}

fn is_forwarded_http(request: &Request) -> bool {
    request
        .headers()
        .get(FORWARDED_PROTO_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("http"))
}

/// `https://<host>[:port]<path>`; the port is omitted when it is 443.
pub fn https_location(host: &str, https_port: u16, path_and_query: &str) -> Option<String> {
    let authority = host.parse::<Authority>().ok()?;

    Some(if https_port == DEFAULT_HTTPS_PORT {
        format!("https://{}{path_and_query}", authority.host())
    } else {
        format!("https://{}:{https_port}{path_and_query}", authority.host())
    })
}
