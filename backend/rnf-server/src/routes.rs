use crate::{
    AppState, admin, change_password, confirm_email, get_user_info, health, home, issue_token,
    login, logout, redirect_to_https, register, request_scope, ship_request_logs,
    validate_antiforgery,
};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build the application router with all endpoints and the middleware pipeline.
///
/// Outermost first: https redirection, tracing, request scope, log shipping,
/// then the routes (account POSTs behind anti-forgery) with static files as
/// the fallback.
pub fn build_router(state: AppState) -> Router {
    let account = Router::new()
        .route("/Account/Register", post(register))
        .route("/Account/Login", post(login))
        .route("/Account/Logout", post(logout))
        .route("/Account/Manage/ChangePassword", post(change_password))
        .route_layer(middleware::from_fn(validate_antiforgery));

    let static_files = ServeDir::new(state.static_dir());

    Router::new()
        // Pages
        .route("/", get(home))
        // API
        .route("/api/auth/user-info", get(get_user_info))
        .route("/antiforgery/token", get(issue_token))
        // Identity
        .route("/Account/ConfirmEmail", get(confirm_email))
        .merge(account)
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Development only
        .route("/admin/migrations", post(admin::apply_migrations_handler))
        .fallback_service(static_files)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ship_request_logs,
        ))
        .layer(middleware::from_fn(request_scope))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            redirect_to_https,
        ))
        .with_state(state)
}
