//! Uniform response shape and the normalizer that produces it

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::GoogleMapsError;
use crate::transport::{TransportError, TransportResponse};

/// Outcome of one dispatched operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    /// The caller cancelled before the response arrived
    Cancelled,
    /// Transport fault, unreadable body or remote failure
    Failed,
    /// Local validation rejected the request; nothing was sent
    Invalid,
    /// HTTP 2xx, remote status OK and no embedded error message
    Succeeded,
    /// The transport timed out
    TimedOut,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Invalid => "invalid",
            Self::Succeeded => "succeeded",
            Self::TimedOut => "timed out",
        };
        f.write_str(name)
    }
}

/// A decoded endpoint body that carries its own status
pub trait Payload: DeserializeOwned + Send + 'static {
    /// Whether the embedded remote status reports success
    fn remote_ok(&self) -> bool;

    /// Embedded remote status token, if the endpoint has one
    fn remote_status(&self) -> Option<&str>;

    /// Embedded error message, if any
    fn remote_error(&self) -> Option<&str>;
}

/// Result of a Maps operation
///
/// Exactly one of these is produced per dispatch. `payload` is present
/// whenever a body was decoded, including remote failures such as
/// `ZERO_RESULTS`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapsResponse<P> {
    status: ResponseStatus,
    error: Option<GoogleMapsError>,
    raw_json: Option<String>,
    payload: Option<P>,
}

impl<P> MapsResponse<P> {
    /// A response for a request that failed before or without a payload
    #[must_use]
    pub fn from_error(error: GoogleMapsError, raw_json: Option<String>) -> Self {
        Self {
            status: error.status(),
            error: Some(error),
            raw_json,
            payload: None,
        }
    }

    /// Outcome of the operation
    #[must_use]
    pub const fn status(&self) -> ResponseStatus {
        self.status
    }

    /// Whether the operation succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Succeeded
    }

    /// Error that caused a non-success outcome
    #[must_use]
    pub const fn error(&self) -> Option<&GoogleMapsError> {
        self.error.as_ref()
    }

    /// Error text for a non-success outcome
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Raw body, captured only when debug mode is enabled
    #[must_use]
    pub fn raw_json(&self) -> Option<&str> {
        self.raw_json.as_deref()
    }

    /// Decoded body, if one was received
    #[must_use]
    pub const fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Take the decoded body
    #[must_use]
    pub fn into_payload(self) -> Option<P> {
        self.payload
    }

    /// Convert into a `Result` for use with `?`
    ///
    /// # Errors
    ///
    /// Returns the recorded error for any outcome other than
    /// [`ResponseStatus::Succeeded`].
    pub fn into_result(self) -> Result<P, GoogleMapsError> {
        match (self.error, self.payload) {
            (None, Some(payload)) => Ok(payload),
            (Some(error), _) => Err(error),
            (None, None) => Err(GoogleMapsError::Protocol("response is null.".to_string())),
        }
    }
}

/// Map a transport outcome onto a [`MapsResponse`]
pub(crate) fn normalize<P: Payload>(
    outcome: Result<TransportResponse, TransportError>,
    capture_raw: bool,
) -> MapsResponse<P> {
    let response = match outcome {
        Ok(response) => response,
        Err(TransportError::Timeout) => {
            warn!("Request timed out");
            return MapsResponse::from_error(GoogleMapsError::Timeout, None);
        },
        Err(e) => {
            warn!(error = %e, "Transport failure");
            return MapsResponse::from_error(GoogleMapsError::Transport(e.to_string()), None);
        },
    };

    debug!(
        http_status = response.status,
        content_type = ?response.content_type,
        bytes = response.body.len(),
        "Response received"
    );

    let raw_json = capture_raw.then(|| response.body.clone());

    if !response.is_json() {
        warn!(content_type = ?response.content_type, "Response is not JSON");
        return MapsResponse::from_error(GoogleMapsError::Protocol(response.body), raw_json);
    }

    let payload = match serde_json::from_str::<Option<P>>(&response.body) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            warn!("Response is null");
            return MapsResponse::from_error(
                GoogleMapsError::Protocol("response is null.".to_string()),
                raw_json,
            );
        },
        Err(e) => {
            warn!(error = %e, "Failed to decode response");
            return MapsResponse::from_error(GoogleMapsError::Protocol(e.to_string()), raw_json);
        },
    };

    let failed =
        !response.is_success() || !payload.remote_ok() || payload.remote_error().is_some();
    let error = if failed {
        let message = payload
            .remote_error()
            .map(str::to_string)
            .or_else(|| {
                (!payload.remote_ok())
                    .then(|| payload.remote_status().map(|s| format!("remote status {s}")))
                    .flatten()
            })
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        warn!(
            http_status = response.status,
            remote_status = ?payload.remote_status(),
            %message,
            "Remote service reported a failure"
        );
        Some(GoogleMapsError::Remote {
            status: payload.remote_status().map(str::to_string),
            message,
        })
    } else {
        None
    };

    MapsResponse {
        status: error.as_ref().map_or(ResponseStatus::Succeeded, GoogleMapsError::status),
        error,
        raw_json,
        payload: Some(payload),
    }
}
