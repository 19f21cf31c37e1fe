use crate::is_safe_method;

use axum::http::Method;
use googletest::prelude::*;

#[test]
fn given_read_only_methods_then_safe() {
    for method in [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE] {
        assert_that!(is_safe_method(&method), eq(true));
    }
}

#[test]
fn given_mutating_methods_then_unsafe() {
    for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
        assert_that!(is_safe_method(&method), eq(false));
    }
}
