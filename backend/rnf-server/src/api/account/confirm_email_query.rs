use serde::Deserialize;

/// Query string of GET /Account/ConfirmEmail, as written into confirmation links
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmEmailQuery {
    pub user_id: String,
    pub code: String,
}
