//! Google Maps client
//!
//! Every operation goes through the same pipeline: validate, check for
//! cancellation, build the URL (and body), send through the transport while
//! racing the cancellation token, then normalize the outcome.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::address_validation::{AddressValidationPayload, AddressValidationRequest};
use crate::config::GoogleMapsConfig;
use crate::distance_matrix::{DistanceMatrixPayload, DistanceMatrixRequest};
use crate::elevation::{ElevationPayload, ElevationRequest};
use crate::error::GoogleMapsError;
use crate::geocode::{GeocodePayload, GeocodeRequest};
use crate::point::LatLng;
use crate::request::{Endpoint, Service, redact_key};
use crate::response::{MapsResponse, normalize};
use crate::time_zone::{TimeZonePayload, TimeZoneRequest};
use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest};
use crate::urlencoding::encode;

/// Trait for Google Maps clients
///
/// The `*_request` methods take a full request and an optional cancellation
/// token; the remaining methods are shortcuts for the common cases. No method
/// returns `Err`: every outcome is reported through
/// [`MapsResponse::status`].
#[async_trait]
pub trait MapsClient: Send + Sync {
    /// Forward geocode (address and/or component filters)
    async fn geocode_request(
        &self,
        request: &GeocodeRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<GeocodePayload>;

    /// Reverse geocode (`latlng` required)
    async fn reverse_geocode_request(
        &self,
        request: &GeocodeRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<GeocodePayload>;

    /// Distances and durations between origins and destinations
    async fn distance_matrix_request(
        &self,
        request: &DistanceMatrixRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<DistanceMatrixPayload>;

    /// Elevation at points or along a path
    async fn elevation_request(
        &self,
        request: &ElevationRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<ElevationPayload>;

    /// Time zone at a point and instant
    async fn time_zone_request(
        &self,
        request: &TimeZoneRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<TimeZonePayload>;

    /// Validate and standardize a postal address
    async fn validate_address_request(
        &self,
        request: &AddressValidationRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<AddressValidationPayload>;

    /// Geocode a free-text address
    async fn geocode(
        &self,
        address: &str,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<GeocodePayload> {
        self.geocode_request(&GeocodeRequest::for_address(address), cancel)
            .await
    }

    /// Reverse geocode a point
    async fn reverse_geocode(
        &self,
        point: LatLng,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<GeocodePayload> {
        self.reverse_geocode_request(&GeocodeRequest::for_latlng(point), cancel)
            .await
    }

    /// Distance and duration between one origin and one destination
    async fn distance_matrix(
        &self,
        origin: &str,
        destination: &str,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<DistanceMatrixPayload> {
        self.distance_matrix_request(&DistanceMatrixRequest::new([origin], [destination]), cancel)
            .await
    }

    /// Distances and durations for every origin/destination pair
    async fn distance_matrix_many(
        &self,
        origins: &[&str],
        destinations: &[&str],
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<DistanceMatrixPayload> {
        let request =
            DistanceMatrixRequest::new(origins.iter().copied(), destinations.iter().copied());
        self.distance_matrix_request(&request, cancel).await
    }

    /// Elevation at a single point
    async fn elevation(
        &self,
        point: LatLng,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<ElevationPayload> {
        self.elevation_request(&ElevationRequest::for_locations([point]), cancel)
            .await
    }

    /// Elevation at each of the given points
    async fn elevation_many(
        &self,
        points: &[LatLng],
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<ElevationPayload> {
        let request = ElevationRequest::for_locations(points.iter().copied());
        self.elevation_request(&request, cancel).await
    }

    /// Time zone at a point, right now
    async fn time_zone(
        &self,
        point: LatLng,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<TimeZonePayload> {
        self.time_zone_request(&TimeZoneRequest::new(point, Utc::now()), cancel)
            .await
    }

    /// Location of the best match for an address
    ///
    /// Returns `None` for blank input (without a network call) and for any
    /// outcome other than a successful lookup with at least one result.
    async fn geocode_point(
        &self,
        address: &str,
        cancel: Option<&CancellationToken>,
    ) -> Option<LatLng> {
        if address.trim().is_empty() {
            return None;
        }
        let response = self.geocode(address, cancel).await;
        if !response.is_success() {
            return None;
        }
        response.payload().and_then(GeocodePayload::first_location)
    }
}

/// Google Maps Platform client
pub struct GoogleMapsClient {
    transport: Arc<dyn HttpTransport>,
    config: GoogleMapsConfig,
}

impl fmt::Debug for GoogleMapsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleMapsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GoogleMapsClient {
    /// Create a new client backed by `reqwest`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: GoogleMapsConfig) -> Result<Self, GoogleMapsError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self {
            transport: Arc::new(transport),
            config,
        })
    }

    /// Create a client from the `googlemaps` config file and `GOOGLE_MAPS_*`
    /// environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if no valid configuration can be loaded.
    pub fn from_env() -> Result<Self, GoogleMapsError> {
        Self::new(GoogleMapsConfig::load()?)
    }

    /// Create a client with a custom transport
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_transport(
        config: GoogleMapsConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, GoogleMapsError> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &GoogleMapsConfig {
        &self.config
    }

    /// Full request URL, `key` last
    #[must_use]
    pub fn request_url<E: Endpoint>(&self, request: &E) -> String {
        let base = match E::SERVICE {
            Service::Maps => &self.config.base_url,
            Service::AddressValidation => &self.config.address_validation_url,
        };
        let base = base.trim_end_matches('/');
        let key = encode(self.config.api_key_str());
        let query = request.query();

        if query.is_empty() {
            format!("{base}{}?key={key}", E::PATH)
        } else {
            format!("{base}{}?{}&key={key}", E::PATH, query.to_query_string())
        }
    }

    /// Validate, dispatch and normalize any operation
    pub async fn execute<E: Endpoint>(
        &self,
        request: &E,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<E::Payload> {
        if let Err(e) = request.validate() {
            warn!(operation = E::NAME, error = %e, "Request rejected");
            return MapsResponse::from_error(e, None);
        }

        if cancel.is_some_and(CancellationToken::is_cancelled) {
            debug!(operation = E::NAME, "Cancelled before dispatch");
            return MapsResponse::from_error(GoogleMapsError::Cancelled, None);
        }

        let body = match request.body() {
            Ok(body) => body,
            Err(e) => return MapsResponse::from_error(e, None),
        };

        let url = self.request_url(request);
        debug!(
            operation = E::NAME,
            method = %E::METHOD,
            url = redact_key(&url),
            "Dispatching request"
        );

        let send = self.transport.send(TransportRequest {
            method: E::METHOD,
            url,
            body,
        });

        let outcome = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        debug!(operation = E::NAME, "Cancelled in flight");
                        return MapsResponse::from_error(GoogleMapsError::Cancelled, None);
                    }
                    outcome = send => outcome,
                }
            },
            None => send.await,
        };

        normalize(outcome, self.config.debug)
    }
}

#[async_trait]
impl MapsClient for GoogleMapsClient {
    #[instrument(skip(self, cancel))]
    async fn geocode_request(
        &self,
        request: &GeocodeRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<GeocodePayload> {
        if request.address().is_none() && request.components().is_empty() {
            return MapsResponse::from_error(
                GoogleMapsError::Validation(
                    "address or components is required for geocoding".to_string(),
                ),
                None,
            );
        }
        self.execute(request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    async fn reverse_geocode_request(
        &self,
        request: &GeocodeRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<GeocodePayload> {
        if request.latlng().is_none() {
            return MapsResponse::from_error(
                GoogleMapsError::Validation(
                    "latlng is required for reverse geocoding".to_string(),
                ),
                None,
            );
        }
        self.execute(request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    async fn distance_matrix_request(
        &self,
        request: &DistanceMatrixRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<DistanceMatrixPayload> {
        self.execute(request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    async fn elevation_request(
        &self,
        request: &ElevationRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<ElevationPayload> {
        self.execute(request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    async fn time_zone_request(
        &self,
        request: &TimeZoneRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<TimeZonePayload> {
        self.execute(request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    async fn validate_address_request(
        &self,
        request: &AddressValidationRequest,
        cancel: Option<&CancellationToken>,
    ) -> MapsResponse<AddressValidationPayload> {
        self.execute(request, cancel).await
    }
}
