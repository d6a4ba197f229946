//! Google Maps Platform integration
//!
//! Typed access to the geocoding, reverse geocoding, distance matrix,
//! elevation, time zone and address validation web services.
//!
//! # Architecture
//!
//! Each operation has a request type implementing [`Endpoint`], which encodes
//! the query string in a fixed order and validates the request before any
//! network activity. [`GoogleMapsClient`] sends it through an
//! [`HttpTransport`] and normalizes whatever comes back into a
//! [`MapsResponse`] carrying one [`ResponseStatus`]: transport faults,
//! timeouts, cancellation, non-JSON bodies and remote error statuses are all
//! reported there instead of as `Err`.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_googlemaps::{GoogleMapsClient, GoogleMapsConfig, MapsClient};
//!
//! let client = GoogleMapsClient::new(GoogleMapsConfig::new("AIza..."))?;
//!
//! let response = client.geocode("1600 Pennsylvania Ave NW, Washington, DC", None).await;
//! if let Some(point) = response.payload().and_then(|p| p.first_location()) {
//!     println!("{point}");
//! }
//! ```

mod address_validation;
mod client;
mod config;
mod distance_matrix;
mod elevation;
mod error;
mod geocode;
mod language;
mod point;
mod request;
mod response;
mod time_zone;
mod tokens;
mod transport;
mod urlencoding;

pub use address_validation::{
    AddressValidationPayload, AddressValidationRequest, ApiError, Granularity, LatLngLiteral,
    PostalAddress, ValidatedAddress, ValidationGeocode, ValidationResult, Verdict,
};
pub use client::{GoogleMapsClient, MapsClient};
pub use config::GoogleMapsConfig;
pub use distance_matrix::{
    Avoid, DepartureTime, DistanceMatrixPayload, DistanceMatrixRequest, DistanceMatrixStatus,
    Element, ElementStatus, Fare, MAX_DIMENSION, Row, TextValue, TrafficModel, TransitMode,
    TransitRoutingPreference, TravelMode, UnitSystem,
};
pub use elevation::{
    ElevationPayload, ElevationRequest, ElevationResult, ElevationStatus, MAX_SAMPLES,
};
pub use error::GoogleMapsError;
pub use geocode::{
    AddressComponent, AddressType, ComponentFilter, ComponentKind, GeocodePayload, GeocodeRequest,
    GeocodeResult, GeocodeStatus, Geometry, LocationType, PlusCode,
};
pub use language::Language;
pub use point::{Bounds, LatLng, PointError};
pub use request::{Endpoint, HttpMethod, Query, Service, redact_key};
pub use response::{MapsResponse, Payload, ResponseStatus};
pub use time_zone::{TimeZonePayload, TimeZoneRequest, TimeZoneStatus};
pub use tokens::TokenError;
pub use tokio_util::sync::CancellationToken;
pub use transport::{
    HttpTransport, ReqwestTransport, TransportError, TransportRequest, TransportResponse,
};
