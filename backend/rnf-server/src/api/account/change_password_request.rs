use serde::Deserialize;

/// Request body for POST /Account/Manage/ChangePassword
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
    /// Whether the replacement session cookie outlives the browser, as at sign-in
    #[serde(default)]
    pub remember_me: bool,
}
