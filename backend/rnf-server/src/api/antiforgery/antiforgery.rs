//! Double-submit anti-forgery protection
//!
//! `GET /antiforgery/token` sets a random token in an HttpOnly cookie and
//! returns the same token in the body. Unsafe requests must echo it in the
//! `X-CSRF-TOKEN` header.

use crate::{AntiforgeryTokenResponse, ApiError, AppState};

use rnf_auth::{generate_token, tokens_match};
use rnf_core::ErrorLocation;

use std::panic::Location;

use axum::{
    Json,
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use log::debug;

pub const ANTIFORGERY_COOKIE_NAME: &str = ".Rnf.Antiforgery";
pub const ANTIFORGERY_HEADER_NAME: &str = "X-CSRF-TOKEN";

/// GET /antiforgery/token
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<AntiforgeryTokenResponse>) {
    let token = generate_token();
    let cookie = Cookie::build((ANTIFORGERY_COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.identity.config().cookie_secure);

    (
        jar.add(cookie),
        Json(AntiforgeryTokenResponse {
            token,
            header_name: ANTIFORGERY_HEADER_NAME.to_string(),
        }),
    )
}

/// Middleware: reject unsafe requests whose header token does not match the cookie.
pub async fn validate_antiforgery(request: Request, next: Next) -> Response {
    if is_safe_method(request.method()) {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    let cookie_token = jar.get(ANTIFORGERY_COOKIE_NAME).map(Cookie::value);
    let header_token = request
        .headers()
        .get(ANTIFORGERY_HEADER_NAME)
        .and_then(|value| value.to_str().ok());

    let valid = match (cookie_token, header_token) {
        (Some(cookie), Some(header)) => tokens_match(header, cookie),
        _ => false,
    };

    if valid {
        return next.run(request).await;
    }

    debug!(
        "Anti-forgery validation failed for {} {} (cookie: {}, header: {})",
        request.method(),
        request.uri().path(),
        cookie_token.is_some(),
        header_token.is_some()
    );

    ApiError::BadRequest {
        code: "ANTIFORGERY_VALIDATION_FAILED",
        message: "The required antiforgery token was not supplied or was invalid.".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into_response()
}

pub fn is_safe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}
