pub mod antiforgery;
pub mod antiforgery_token_response;
