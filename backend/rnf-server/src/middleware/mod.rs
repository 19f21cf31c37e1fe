pub mod https_redirection;
pub mod log_shipping;
pub mod request_scope;
