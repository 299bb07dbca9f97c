use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failure of a single timed fetch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Request timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Unknown(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Cannot access page: {code} {reason}")]
    NonSuccessStatus { code: u16, reason: String },

    #[error("Check aborted: {0}")]
    Aborted(String),

    #[error("Invalid resource URI: {0}")]
    InvalidResource(String),

    #[error("Maximum {max} URLs allowed, got {got}")]
    TooManyUrls { max: usize, got: usize },

    #[error("Please provide at least one URL")]
    NoUrls,

    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    NetworkError,
    NonSuccessStatus,
    Unknown,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Fetch(FetchError::Timeout(_)) => ErrorKind::Timeout,
            Error::Fetch(FetchError::Network(_)) => ErrorKind::NetworkError,
            Error::NonSuccessStatus { .. } => ErrorKind::NonSuccessStatus,
            _ => ErrorKind::Unknown,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_seconds() {
        let err = FetchError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Request timed out after 30 seconds");
    }

    #[test]
    fn test_sub_second_timeout_message() {
        let err = FetchError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Request timed out after 0.25 seconds");
    }

    #[test]
    fn test_error_kind_classification() {
        assert_eq!(
            Error::from(FetchError::Timeout(Duration::from_secs(5))).kind(),
            ErrorKind::Timeout
        );
        assert_eq!(
            Error::from(FetchError::Network("refused".to_string())).kind(),
            ErrorKind::NetworkError
        );
        assert_eq!(
            Error::NonSuccessStatus {
                code: 404,
                reason: "Not Found".to_string()
            }
            .kind(),
            ErrorKind::NonSuccessStatus
        );
        assert_eq!(Error::Aborted("panicked".to_string()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_non_success_status_message() {
        let err = Error::NonSuccessStatus {
            code: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot access page: 503 Service Unavailable");
    }
}
