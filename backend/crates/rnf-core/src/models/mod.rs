pub mod application_user;
pub mod session;
pub mod token_purpose;
pub mod user_info;
pub mod user_token;
