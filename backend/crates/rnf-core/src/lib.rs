pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::application_user::ApplicationUser;
pub use models::session::Session;
pub use models::token_purpose::TokenPurpose;
pub use models::user_info::UserInfo;
pub use models::user_token::UserToken;

pub use error_location::ErrorLocation;
