mod application_user;
mod session;
mod token_purpose;
mod user_info;
