pub mod admin;
pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod middleware;
pub mod pages;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    account::{
        account::{
            CONFIRM_EMAIL_PATH, change_password, confirm_email, confirm_email_url, login, logout,
            register, session_cookie,
        },
        change_password_request::ChangePasswordRequest,
        confirm_email_query::ConfirmEmailQuery,
        login_request::LoginRequest,
        message_response::MessageResponse,
        register_request::RegisterRequest,
        register_response::RegisterResponse,
    },
    antiforgery::{
        antiforgery::{
            ANTIFORGERY_COOKIE_NAME, ANTIFORGERY_HEADER_NAME, is_safe_method, issue_token,
            validate_antiforgery,
        },
        antiforgery_token_response::AntiforgeryTokenResponse,
    },
    auth::user_info::get_user_info,
    error::ApiError,
    error::ErrorDetail,
    error::Result as ApiResult,
    extractors::authentication::Authentication,
};
pub use app_state::AppState;
pub use middleware::{
    https_redirection::{FORWARDED_PROTO_HEADER, https_location, redirect_to_https},
    log_shipping::ship_request_logs,
    request_scope::{REQUEST_ID_HEADER, request_scope},
};
pub use pages::home::{USER_INFO_ELEMENT_ID, home, render_home};

pub use crate::routes::build_router;
