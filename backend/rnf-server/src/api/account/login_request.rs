use serde::Deserialize;

/// Request body for POST /Account/Login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Persist the cookie across browser sessions
    #[serde(default)]
    pub remember_me: bool,
}
