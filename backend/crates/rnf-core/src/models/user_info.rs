use crate::ApplicationUser;

use serde::{Deserialize, Serialize};

/// Client-visible projection of the authenticated identity.
///
/// Add fields here (and to the authentication-state provider) to expose more
/// information about the signed-in user to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub user_id: String,
}

impl From<&ApplicationUser> for UserInfo {
    fn from(user: &ApplicationUser) -> Self {
        Self {
            email: user.email.clone(),
            user_id: user.id.to_string(),
        }
    }
}
