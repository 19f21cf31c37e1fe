use serde::Serialize;

/// Response for GET /antiforgery/token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AntiforgeryTokenResponse {
    pub token: String,
    /// Header the token must be echoed in on unsafe requests
    pub header_name: String,
}
