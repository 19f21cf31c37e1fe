use crate::{ApiError, ErrorDetail};

use rnf_auth::AuthError;
use rnf_core::ErrorLocation;
use rnf_db::DbError;

use std::panic::Location;

use axum::{http::StatusCode, response::IntoResponse};
use googletest::prelude::*;

#[test]
fn given_validation_error_then_bad_request_with_field() {
    let error = ApiError::validation("email", "Email is required");

    assert_that!(error.status(), eq(StatusCode::BAD_REQUEST));
    assert_that!(error.code(), eq("VALIDATION_ERROR"));
}

#[test]
fn given_not_found_error_then_not_found_status() {
    let error = ApiError::not_found("/missing");

    assert_that!(error.status(), eq(StatusCode::NOT_FOUND));
    assert_that!(error.code(), eq("NOT_FOUND"));
}

#[test]
fn given_unauthorized_error_then_unauthorized_code() {
    let error = ApiError::unauthorized("No user is signed in.");

    assert_that!(error.status(), eq(StatusCode::UNAUTHORIZED));
    assert_that!(error.code(), eq("UNAUTHORIZED"));
}

#[test]
fn given_internal_error_when_rendered_then_detail_attached_to_extensions() {
    let response = ApiError::internal("connection pool exhausted").into_response();

    assert_that!(response.status(), eq(StatusCode::INTERNAL_SERVER_ERROR));
    let detail = response.extensions().get::<ErrorDetail>();
    assert_that!(detail, some(anything()));
    let detail = detail.unwrap();
    assert_that!(detail.code, eq("INTERNAL_ERROR"));
    assert_that!(detail.detail, contains_substring("connection pool exhausted"));
    assert_that!(detail.to_string(), starts_with("INTERNAL_ERROR (500): "));
}

#[test]
fn given_invalid_credentials_when_converted_then_unauthorized() {
    let error = ApiError::from(AuthError::invalid_credentials());

    assert_that!(error.status(), eq(StatusCode::UNAUTHORIZED));
    assert_that!(error.code(), eq("INVALID_CREDENTIALS"));
}

#[test]
fn given_email_not_confirmed_when_converted_then_forbidden() {
    let error = ApiError::from(AuthError::EmailNotConfirmed {
        location: ErrorLocation::from(Location::caller()),
    });

    assert_that!(error.status(), eq(StatusCode::FORBIDDEN));
    assert_that!(error.code(), eq("EMAIL_NOT_CONFIRMED"));
}

#[test]
fn given_duplicate_email_when_converted_then_conflict_on_email_field() {
    let error = ApiError::from(AuthError::DuplicateEmail {
        email: String::from("ada@example.com"),
        location: ErrorLocation::from(Location::caller()),
    });

    assert_that!(error.status(), eq(StatusCode::CONFLICT));
    assert_that!(error.code(), eq("DUPLICATE_EMAIL"));
    assert!(matches!(
        error,
        ApiError::Conflict { field: Some(ref field), .. } if field == "email"
    ));
}

#[test]
fn given_invalid_token_when_converted_then_bad_request() {
    let error = ApiError::from(AuthError::invalid_token("code mismatch"));

    assert_that!(error.status(), eq(StatusCode::BAD_REQUEST));
    assert_that!(error.code(), eq("INVALID_TOKEN"));
}

#[test]
fn given_auth_validation_when_converted_then_field_kept() {
    let error = ApiError::from(AuthError::validation("password", "too short"));

    assert_that!(error.code(), eq("VALIDATION_ERROR"));
    assert!(matches!(
        error,
        ApiError::Validation { field: Some(ref field), .. } if field == "password"
    ));
}

#[test]
fn given_db_error_when_converted_then_internal() {
    let error = ApiError::from(DbError::DuplicateEmail {
        email: String::from("ada@example.com"),
        location: ErrorLocation::from(Location::caller()),
    });

    assert_that!(error.status(), eq(StatusCode::INTERNAL_SERVER_ERROR));
}
