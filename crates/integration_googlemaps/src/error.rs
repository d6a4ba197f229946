//! Google Maps error types

use thiserror::Error;

use crate::response::ResponseStatus;

/// Errors that can occur while issuing a Maps request
///
/// Apart from [`GoogleMapsError::Configuration`], these never escape an
/// operation as `Err`: the client records them on the
/// [`MapsResponse`](crate::MapsResponse) together with the matching
/// [`ResponseStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoogleMapsError {
    /// The request failed local validation and was never sent
    #[error("request is invalid: {0}")]
    Validation(String),

    /// The caller cancelled the request
    #[error("request was cancelled before completion.")]
    Cancelled,

    /// The transport gave up waiting for the service
    #[error("request timed out before completion.")]
    Timeout,

    /// Connection or other transport fault
    #[error("{0}")]
    Transport(String),

    /// The response could not be interpreted (wrong content type, null or
    /// undecodable body)
    #[error("{0}")]
    Protocol(String),

    /// The service answered but reported a failure
    #[error("{message}")]
    Remote {
        /// Remote status token, when the payload carried one
        status: Option<String>,
        /// Embedded error message or a description of the failure
        message: String,
    },

    /// Client configuration is unusable
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GoogleMapsError {
    /// The uniform outcome this error is reported as
    #[must_use]
    pub const fn status(&self) -> ResponseStatus {
        match self {
            Self::Validation(_) | Self::Configuration(_) => ResponseStatus::Invalid,
            Self::Cancelled => ResponseStatus::Cancelled,
            Self::Timeout => ResponseStatus::TimedOut,
            Self::Transport(_) | Self::Protocol(_) | Self::Remote { .. } => ResponseStatus::Failed,
        }
    }

    /// Returns true if repeating the same request may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Transport(_) => true,
            Self::Remote {
                status: Some(status),
                ..
            } => matches!(status.as_str(), "OVER_QUERY_LIMIT" | "UNKNOWN_ERROR"),
            _ => false,
        }
    }
}
