//! Identity endpoints
//!
//! JSON counterparts of the account pages: register, confirm email, sign in,
//! sign out and change password. Sessions travel in an HttpOnly cookie.

use crate::{
    ApiError, ApiResult, AppState, Authentication, ChangePasswordRequest, ConfirmEmailQuery,
    LoginRequest, MessageResponse, RegisterRequest, RegisterResponse,
};

use rnf_auth::AuthenticationState;
use rnf_core::{Session, UserInfo};

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use log::info;
use uuid::Uuid;

pub const CONFIRM_EMAIL_PATH: &str = "/Account/ConfirmEmail";

/// POST /Account/Register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    if request.password != request.confirm_password {
        return Err(ApiError::validation(
            "confirmPassword",
            "The password and confirmation password do not match.",
        ));
    }

    let confirm_url = confirm_email_url(&headers, &state);
    let registration = state
        .identity
        .register(&request.email, &request.password, &confirm_url)
        .await?;

    let message = if registration.requires_confirmation {
        "Please check your email to confirm your account."
    } else {
        "Registration succeeded. You can now sign in."
    };

    Ok(Json(RegisterResponse {
        user_id: registration.user_id.to_string(),
        requires_confirmation: registration.requires_confirmation,
        message: message.to_string(),
    }))
}

/// GET /Account/ConfirmEmail?userId=..&code=..
pub async fn confirm_email(
    State(state): State<AppState>,
    Query(query): Query<ConfirmEmailQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let user_id = Uuid::parse_str(&query.user_id)
        .map_err(|e| ApiError::validation("userId", format!("Invalid user id: {e}")))?;

    state.identity.confirm_email(user_id, &query.code).await?;

    Ok(Json(MessageResponse::new(
        "Thank you for confirming your email.",
    )))
}

/// POST /Account/Login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<UserInfo>)> {
    let sign_in = state
        .identity
        .sign_in(&request.email, &request.password)
        .await?;

    let cookie = session_cookie(&state, &sign_in.session, request.remember_me);
    Ok((jar.add(cookie), Json(UserInfo::from(&sign_in.user))))
}

/// POST /Account/Logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, StatusCode)> {
    let cookie_name = state.identity.config().cookie_name.clone();

    if let Some(token) = jar.get(&cookie_name).map(|cookie| cookie.value().to_string()) {
        state.identity.sign_out(&token).await?;
    }

    let removal = Cookie::build((cookie_name, "")).path("/");
    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}

/// POST /Account/Manage/ChangePassword
///
/// Rotates the security stamp, so every other session of the user ends at
/// its next revalidation. The caller gets a fresh session, persistent when
/// the request carries `rememberMe`.
pub async fn change_password(
    State(state): State<AppState>,
    Authentication(auth): Authentication,
    jar: CookieJar,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let AuthenticationState::Authenticated {
        user,
        session_token,
        ..
    } = auth
    else {
        return Err(ApiError::unauthorized("You must be signed in."));
    };

    if request.new_password != request.confirm_password {
        return Err(ApiError::validation(
            "confirmPassword",
            "The new password and confirmation password do not match.",
        ));
    }

    state
        .identity
        .change_password(user.id, &request.old_password, &request.new_password)
        .await?;

    state.identity.sign_out(&session_token).await?;
    let sign_in = state
        .identity
        .sign_in(&user.email, &request.new_password)
        .await?;
    info!("User {} refreshed their session after a password change", user.id);

    let cookie = session_cookie(&state, &sign_in.session, request.remember_me);
    Ok((
        jar.add(cookie),
        Json(MessageResponse::new("Your password has been changed")),
    ))
}

/// The identity cookie for a new session. Persistent sessions outlive the
/// browser; others end with it.
pub fn session_cookie(state: &AppState, session: &Session, persistent: bool) -> Cookie<'static> {
    let config = state.identity.config();
    let mut cookie = Cookie::build((config.cookie_name.clone(), session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure);

    if persistent {
        cookie = cookie.max_age(time::Duration::hours(config.session_lifetime_hours));
    }

    cookie.build()
}

/// Absolute URL of the confirmation endpoint, as seen by the client.
pub fn confirm_email_url(headers: &HeaderMap, state: &AppState) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}:{}", state.server.host, state.server.port));

    format!("{scheme}://{host}{CONFIRM_EMAIL_PATH}")
}
