//! Elevation at discrete points or sampled along a path

use serde::Deserialize;

use crate::error::GoogleMapsError;
use crate::point::LatLng;
use crate::request::{Endpoint, Query, require_point};
use crate::response::Payload;
use crate::tokens::token_enum;

/// Largest `samples` value the service accepts
pub const MAX_SAMPLES: u16 = 512;

token_enum! {
    /// Top-level status of an elevation response
    pub enum ElevationStatus {
        Ok => "OK",
        DataNotAvailable => "DATA_NOT_AVAILABLE",
        InvalidRequest => "INVALID_REQUEST",
        OverDailyLimit => "OVER_DAILY_LIMIT",
        OverQueryLimit => "OVER_QUERY_LIMIT",
        RequestDenied => "REQUEST_DENIED",
        UnknownError => "UNKNOWN_ERROR",
    }
}

/// Request for `GET /elevation/json`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElevationRequest {
    locations: Vec<LatLng>,
    path: Vec<LatLng>,
    samples: Option<u16>,
}

impl ElevationRequest {
    /// Elevation at each of the given points
    #[must_use]
    pub fn for_locations(locations: impl IntoIterator<Item = LatLng>) -> Self {
        Self {
            locations: locations.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Elevation at `samples` evenly spaced points along a path
    #[must_use]
    pub fn for_path(path: impl IntoIterator<Item = LatLng>, samples: u16) -> Self {
        Self {
            path: path.into_iter().collect(),
            samples: Some(samples),
            ..Self::default()
        }
    }

    /// Add a discrete location
    #[must_use]
    pub fn with_location(mut self, location: LatLng) -> Self {
        self.locations.push(location);
        self
    }

    /// Add a path vertex
    #[must_use]
    pub fn with_path_point(mut self, point: LatLng) -> Self {
        self.path.push(point);
        self
    }

    /// Number of samples along the path
    #[must_use]
    pub const fn with_samples(mut self, samples: u16) -> Self {
        self.samples = Some(samples);
        self
    }
}

impl Endpoint for ElevationRequest {
    type Payload = ElevationPayload;

    const NAME: &'static str = "elevation";
    const PATH: &'static str = "/elevation/json";

    fn validate(&self) -> Result<(), GoogleMapsError> {
        for point in &self.locations {
            require_point("locations", point)?;
        }
        for point in &self.path {
            require_point("path", point)?;
        }

        match (self.locations.is_empty(), self.path.is_empty()) {
            (true, true) => {
                return Err(GoogleMapsError::Validation(
                    "one of locations or path is required".to_string(),
                ));
            },
            (false, false) => {
                return Err(GoogleMapsError::Validation(
                    "locations and path are mutually exclusive".to_string(),
                ));
            },
            (false, true) => {
                if self.samples.is_some() {
                    return Err(GoogleMapsError::Validation(
                        "samples is only valid with a path".to_string(),
                    ));
                }
            },
            (true, false) => {
                if self.path.len() < 2 {
                    return Err(GoogleMapsError::Validation(
                        "path needs at least 2 points".to_string(),
                    ));
                }
                match self.samples {
                    None => {
                        return Err(GoogleMapsError::Validation(
                            "path requires samples".to_string(),
                        ));
                    },
                    Some(samples) if samples == 0 || samples > MAX_SAMPLES => {
                        return Err(GoogleMapsError::Validation(format!(
                            "samples must be between 1 and {MAX_SAMPLES}"
                        )));
                    },
                    Some(_) => {},
                }
            },
        }
        Ok(())
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_joined("locations", &self.locations)
            .push_joined("path", &self.path)
            .push_opt("samples", self.samples);
        query
    }
}

/// Response body of `GET /elevation/json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElevationPayload {
    /// One result per location or sample
    #[serde(default)]
    pub results: Vec<ElevationResult>,
    /// Top-level status
    pub status: ElevationStatus,
    /// Explanation supplied with non-OK statuses
    #[serde(default)]
    pub error_message: Option<String>,
}

impl Payload for ElevationPayload {
    fn remote_ok(&self) -> bool {
        self.status == ElevationStatus::Ok
    }

    fn remote_status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn remote_error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Elevation of one point
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ElevationResult {
    /// Meters above sea level
    pub elevation: f64,
    /// Point the elevation was computed for
    pub location: LatLng,
    /// Maximum distance between interpolated data points (meters)
    #[serde(default)]
    pub resolution: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> LatLng {
        LatLng::new_unchecked(lat, lng)
    }

    #[test]
    fn locations_are_joined() {
        let request = ElevationRequest::for_locations([
            point(39.739_153_6, -104.984_703_4),
            point(36.455_556, -116.866_667),
        ]);
        assert!(request.validate().is_ok());
        assert_eq!(
            request.query().to_query_string(),
            "locations=39.7391536,-104.9847034|36.455556,-116.866667"
        );
    }

    #[test]
    fn path_with_samples() {
        let request = ElevationRequest::for_path(
            [point(36.578_581, -118.291_994), point(36.239_98, -116.831_71)],
            3,
        );
        assert!(request.validate().is_ok());
        assert_eq!(
            request.query().to_query_string(),
            "path=36.578581,-118.291994|36.23998,-116.83171&samples=3"
        );
    }

    #[test]
    fn validation_rules() {
        assert!(ElevationRequest::default().validate().is_err());
        assert!(
            ElevationRequest::for_locations([point(1.0, 1.0)])
                .with_path_point(point(2.0, 2.0))
                .validate()
                .is_err()
        );
        assert!(
            ElevationRequest::for_locations([point(1.0, 1.0)])
                .with_samples(2)
                .validate()
                .is_err()
        );
        assert!(ElevationRequest::for_path([point(1.0, 1.0)], 2).validate().is_err());
        assert!(
            ElevationRequest::for_path([point(1.0, 1.0), point(2.0, 2.0)], 0)
                .validate()
                .is_err()
        );
        assert!(
            ElevationRequest::for_path([point(1.0, 1.0), point(2.0, 2.0)], MAX_SAMPLES + 1)
                .validate()
                .is_err()
        );
        assert!(
            ElevationRequest::default()
                .with_path_point(point(1.0, 1.0))
                .with_path_point(point(2.0, 2.0))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn decode_payload() {
        let json = r#"{
            "results": [{
                "elevation": 1608.637939453125,
                "location": {"lat": 39.7391536, "lng": -104.9847034},
                "resolution": 4.771975994110107
            }],
            "status": "OK"
        }"#;
        let payload: ElevationPayload = serde_json::from_str(json).unwrap();
        assert!(payload.remote_ok());
        assert!((payload.results[0].elevation - 1608.637_939_453_125).abs() < 1e-9);
        assert!(payload.results[0].resolution.is_some());
    }

    #[test]
    fn decode_data_not_available() {
        let payload: ElevationPayload =
            serde_json::from_str(r#"{"results": [], "status": "DATA_NOT_AVAILABLE"}"#).unwrap();
        assert_eq!(payload.status, ElevationStatus::DataNotAvailable);
        assert!(!payload.remote_ok());
    }

    #[test]
    fn bad_points_are_invalid() {
        let nan = ElevationRequest::for_locations([point(f64::NAN, 500.0)]);
        assert!(matches!(nan.validate(), Err(GoogleMapsError::Validation(_))));

        let path = ElevationRequest::for_path([point(0.0, 0.0), point(0.0, 181.0)], 10);
        let err = path.validate().unwrap_err();
        assert!(err.to_string().contains("path"));
    }
}
