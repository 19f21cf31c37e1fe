//! Development-only administrative endpoints.

use crate::{ApiError, ApiResult, AppState};

use axum::{Json, extract::State};
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MigrationsResponse {
    pub status: String,
    pub message: String,
}

/// POST /admin/migrations
///
/// Applies pending database migrations. Answers 404 outside Development.
pub async fn apply_migrations_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<MigrationsResponse>> {
    if !state.environment.is_development() {
        return Err(ApiError::not_found("/admin/migrations"));
    }

    info!("Applying migrations on request");
    rnf_db::run_migrations(&state.pool).await?;
    info!("Migrations applied");

    Ok(Json(MigrationsResponse {
        status: "ok".to_string(),
        message: "Migrations applied".to_string(),
    }))
}
