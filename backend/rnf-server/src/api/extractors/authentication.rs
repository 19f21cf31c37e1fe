//! Axum extractor resolving the identity cookie into an authentication state

use crate::{ApiError, AppState};

use rnf_auth::AuthenticationState;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// The caller's authentication state. Never rejects for anonymous callers;
/// handlers decide whether they require a signed-in user.
pub struct Authentication(pub AuthenticationState);

impl FromRequestParts<AppState> for Authentication {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let jar = CookieJar::from_headers(&parts.headers);
            let cookie_name = &state.identity.config().cookie_name;
            let token = jar
                .get(cookie_name)
                .map(Cookie::value)
                .filter(|token| !token.is_empty());

            let auth_state = state.auth_state.get_authentication_state(token).await?;
            Ok(Authentication(auth_state))
        }
    }
}
