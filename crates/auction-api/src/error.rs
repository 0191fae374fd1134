//! Error types for the auction API client.

use std::fmt;

/// Errors reported by the auction search backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP-level error with status code.
    Http { status: u16, message: String },
    /// Authentication failure (invalid or missing API key).
    Auth { message: String },
    /// Rate limit exceeded.
    RateLimit { retry_after: Option<u64> },
    /// Resource not found (unknown category or endpoint).
    NotFound { resource: String, id: String },
    /// Request validation error.
    Validation { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP error {}: {}", status, message),
            ApiError::Auth { message } => write!(f, "Auth error: {}", message),
            ApiError::RateLimit { retry_after } => match retry_after {
                Some(secs) => write!(f, "Rate limited, retry after {} seconds", secs),
                None => write!(f, "Rate limited"),
            },
            ApiError::NotFound { resource, id } => write!(f, "{} not found: {}", resource, id),
            ApiError::Validation { message } => write!(f, "Validation error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Returns true if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::RateLimit { .. })
    }
}

/// Top-level error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error response from the API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Network or protocol failure below the API layer.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// Returns the rate-limit retry hint, if this is a rate-limit error.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::Api(ApiError::RateLimit { retry_after }) => *retry_after,
            _ => None,
        }
    }
}

/// A specialized Result type for API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_http() {
        let error = ApiError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("503"));
        assert!(display.contains("Service Unavailable"));
    }

    #[test]
    fn test_api_error_display_rate_limit() {
        let error = ApiError::RateLimit {
            retry_after: Some(60),
        };
        assert!(error.to_string().contains("60"));

        let error = ApiError::RateLimit { retry_after: None };
        assert!(error.to_string().to_lowercase().contains("rate"));
    }

    #[test]
    fn test_api_error_is_retryable() {
        assert!(ApiError::RateLimit { retry_after: None }.is_retryable());
        assert!(!ApiError::Auth {
            message: "bad key".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_error_retry_after() {
        let error = Error::Api(ApiError::RateLimit {
            retry_after: Some(5),
        });
        assert_eq!(error.retry_after(), Some(5));

        let error = Error::Api(ApiError::Validation {
            message: "bad cursor".to_string(),
        });
        assert_eq!(error.retry_after(), None);
    }

    #[test]
    fn test_api_error_implements_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(ApiError::NotFound {
            resource: "category".to_string(),
            id: "unknown/leaf".to_string(),
        });
        assert!(error.to_string().contains("category"));
    }
}
