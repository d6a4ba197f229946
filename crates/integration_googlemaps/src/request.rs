//! Request encoding shared by every operation
//!
//! Each operation request implements [`Endpoint`], which tells the client
//! where the request goes, how it is validated and which ordered query
//! fragments it produces. The API key is appended by the client, never by
//! the request itself.

use std::fmt;

use crate::error::GoogleMapsError;
use crate::point::LatLng;
use crate::response::Payload;

/// HTTP method used by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET` with all parameters in the query string
    Get,
    /// `POST` with a JSON body
    Post,
}

impl HttpMethod {
    /// Method name as sent on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which configured base URL an operation is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// The classic web services under `/maps/api`
    Maps,
    /// The Address Validation API
    AddressValidation,
}

/// Ordered `key=value` fragments of a query string
///
/// Values are written as given: free text must go through
/// [`Query::push_text`] (or be encoded before [`Query::push_joined`]) so the
/// fragment order and bytes are fully determined by the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    fragments: Vec<(&'static str, String)>,
}

impl Query {
    /// Create an empty query
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    /// Append a value that is already safe for a query string
    pub fn push(&mut self, key: &'static str, value: impl fmt::Display) -> &mut Self {
        self.fragments.push((key, value.to_string()));
        self
    }

    /// Append a percent-encoded free-text value
    pub fn push_text(&mut self, key: &'static str, value: &str) -> &mut Self {
        self.push(key, crate::urlencoding::encode(value))
    }

    /// Append a value only when it is set
    pub fn push_opt<T: fmt::Display>(&mut self, key: &'static str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append items joined with `|`, skipping the key entirely for no items
    pub fn push_joined<I>(&mut self, key: &'static str, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let joined = items
            .into_iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join("|");
        if !joined.is_empty() {
            self.push(key, joined);
        }
        self
    }

    /// Value of the first fragment with this key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fragments
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a fragment with this key is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fragments.iter().any(|(k, _)| *k == key)
    }

    /// Keys in emission order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fragments.iter().map(|(k, _)| *k)
    }

    /// Number of fragments
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether no fragment was emitted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Render as `k1=v1&k2=v2`
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.fragments
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A request that can be dispatched by [`GoogleMapsClient`](crate::GoogleMapsClient)
pub trait Endpoint: fmt::Debug + Send + Sync {
    /// Decoded response body
    type Payload: Payload;

    /// Operation name used in logs
    const NAME: &'static str;

    /// Base URL the path is appended to
    const SERVICE: Service = Service::Maps;

    /// Path below the service base URL
    const PATH: &'static str;

    /// HTTP method
    const METHOD: HttpMethod = HttpMethod::Get;

    /// Check the request before any network activity
    ///
    /// # Errors
    ///
    /// Returns [`GoogleMapsError::Validation`] describing the first problem found.
    fn validate(&self) -> Result<(), GoogleMapsError>;

    /// Query fragments in their fixed emission order, without the key
    fn query(&self) -> Query;

    /// JSON body for `POST` operations
    ///
    /// # Errors
    ///
    /// Returns [`GoogleMapsError::Validation`] if the body cannot be serialized.
    fn body(&self) -> Result<Option<String>, GoogleMapsError> {
        Ok(None)
    }
}

/// Strip the trailing `key=` fragment so a URL can be logged
#[must_use]
pub fn redact_key(url: &str) -> &str {
    ["&key=", "?key="]
        .iter()
        .filter_map(|marker| url.rfind(marker))
        .max()
        .map_or(url, |idx| &url[..idx])
}

/// Reject `Some("")` and whitespace-only text
pub(crate) fn require_text(field: &str, value: Option<&str>) -> Result<(), GoogleMapsError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(GoogleMapsError::Validation(format!(
            "{field} must not be empty"
        ))),
        _ => Ok(()),
    }
}

/// Reject points that are not finite or fall outside the WGS84 range
pub(crate) fn require_point(field: &str, point: &LatLng) -> Result<(), GoogleMapsError> {
    LatLng::new(point.lat(), point.lng())
        .map(|_| ())
        .map_err(|e| GoogleMapsError::Validation(format!("{field}: {e}")))
}
