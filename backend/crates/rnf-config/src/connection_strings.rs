use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionStrings {
    /// SQLite URL (`sqlite://app.db`) or plain file path
    pub default_connection: Option<String>,
}
