use rnf_core::CoreError;
use rnf_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid login attempt {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Email not confirmed {location}")]
    EmailNotConfirmed { location: ErrorLocation },

    #[error("Email already registered: {email} {location}")]
    DuplicateEmail {
        email: String,
        location: ErrorLocation,
    },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },

    #[error("Email delivery failed: {message} {location}")]
    EmailDelivery {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database error: {source}")]
    Database {
        #[source]
        source: DbError,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_token<S: Into<String>>(message: S) -> Self {
        Self::InvalidToken {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(field: &str, message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn password_hash<S: Into<String>>(message: S) -> Self {
        Self::PasswordHash {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::EmailNotConfirmed { .. } => "EMAIL_NOT_CONFIRMED",
            Self::DuplicateEmail { .. } => "DUPLICATE_EMAIL",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::PasswordHash { .. } => "PASSWORD_HASH_FAILED",
            Self::EmailDelivery { .. } => "EMAIL_DELIVERY_FAILED",
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn field(&self) -> Option<String> {
        match self {
            Self::Validation { field, .. } => field.clone(),
            Self::DuplicateEmail { .. } => Some(String::from("email")),
            _ => None,
        }
    }
}

impl From<DbError> for AuthError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        match source {
            DbError::DuplicateEmail { email, .. } => Self::DuplicateEmail {
                email,
                location: ErrorLocation::from(Location::caller()),
            },
            source => Self::Database { source },
        }
    }
}

impl From<CoreError> for AuthError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        match source {
            CoreError::Validation { message, field, .. } => Self::Validation {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
            other => Self::Internal {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
