use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Failed to initialize {pipeline} logging: {message} {location}")]
    Init {
        pipeline: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Log shipping failed: {source} {location}")]
    Shipping {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl LogError {
    #[track_caller]
    pub fn init<S: Into<String>>(pipeline: &'static str, message: S) -> Self {
        LogError::Init {
            pipeline,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for LogError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        LogError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for LogError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        LogError::Shipping {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
