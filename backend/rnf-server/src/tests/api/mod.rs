mod antiforgery;
mod error;
