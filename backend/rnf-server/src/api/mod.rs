pub mod account;
pub mod antiforgery;
pub mod auth;
pub mod error;
pub mod extractors;
