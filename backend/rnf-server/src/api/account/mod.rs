pub mod account;
pub mod change_password_request;
pub mod confirm_email_query;
pub mod login_request;
pub mod message_response;
pub mod register_request;
pub mod register_response;
