//! Error types for the timetable service

use keyway_value::ExtractError;
use thiserror::Error;
use url::Url;

/// Failure to produce the timetable document
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProviderError {
    /// Payload is not valid JSON
    #[error("Timetable payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Endpoint could not be reached
    #[error("Timetable endpoint {endpoint} unavailable: {message}")]
    Unavailable {
        /// Requested endpoint
        endpoint: Url,
        /// Transport failure description
        message: String,
    },
}

impl ProviderError {
    /// Create an unavailable error
    pub fn unavailable(endpoint: &Url, message: impl Into<String>) -> Self {
        Self::Unavailable {
            endpoint: endpoint.clone(),
            message: message.into(),
        }
    }
}

/// Timetable service failure
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The provider failed
    #[error("Timetable provider failed: {0}")]
    Provider(#[from] ProviderError),

    /// The document did not hold a usable timetable
    #[error("Timetable document rejected: {0}")]
    Extract(#[from] ExtractError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_messages() {
        let endpoint = Url::parse("https://timetable.example.com/").unwrap();
        let err = ProviderError::unavailable(&endpoint, "connection refused");
        assert_eq!(
            err.to_string(),
            "Timetable endpoint https://timetable.example.com/ unavailable: connection refused"
        );

        let err = ServiceError::from(ExtractError::no_data((), "Vec<TimeTableEntity>"));
        assert_eq!(err.to_string(), "Timetable document rejected: No value for key \"\"");
    }

    #[test]
    fn test_extract_error_recoverable_through_service_error() {
        let err = ServiceError::from(ExtractError::invalid_type("0.id", "i64", serde_json::json!("x")));
        assert!(err.source().is_some());

        let recovered = ExtractError::recover(&err).unwrap();
        assert_eq!(recovered.expected_type(), "i64");
    }
}
