use serde::Serialize;

/// Response for POST /Account/Register
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: String,
    pub requires_confirmation: bool,
    pub message: String,
}
