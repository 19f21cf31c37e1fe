pub mod session_repository;
pub mod user_repository;
pub mod user_token_repository;

use crate::{DbError, Result as DbErrorResult};

use chrono::{DateTime, Utc};
use uuid::Uuid;

fn parse_uuid(table: &'static str, value: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| DbError::corrupt_row(table, format!("bad id '{value}': {e}")))
}

fn from_timestamp(table: &'static str, seconds: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| DbError::corrupt_row(table, format!("bad timestamp {seconds}")))
}
