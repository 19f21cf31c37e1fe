use crate::{ApiError, ApiResult, Authentication};

use rnf_core::UserInfo;

use axum::Json;

/// GET /api/auth/user-info
///
/// The client-visible identity of the current session.
pub async fn get_user_info(Authentication(auth): Authentication) -> ApiResult<Json<UserInfo>> {
    auth.user_info()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::unauthorized("No user is signed in."))
}
