//! Coordinate value objects shared by every operation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for coordinates that cannot be used in a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointError {
    /// Latitude or longitude outside the valid range
    #[error("invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    OutOfRange,

    /// Text that is not a `lat,lng` pair
    #[error("invalid coordinate pair: {0}")]
    Malformed(String),
}

/// A WGS84 point as the Maps APIs encode it (`{"lat": .., "lng": ..}`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns [`PointError::OutOfRange`] if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(lat: f64, lng: f64) -> Result<Self, PointError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(PointError::OutOfRange);
        }
        Ok(Self { lat, lng })
    }

    /// Create a point without validation (for values decoded from the API)
    #[must_use]
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Get the latitude
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Get the longitude
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }
}

/// Query-string form, `lat,lng` with no whitespace
impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for LatLng {
    type Err = PointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| PointError::Malformed(s.to_string()))?;
        let lat = lat
            .trim()
            .parse()
            .map_err(|_| PointError::Malformed(s.to_string()))?;
        let lng = lng
            .trim()
            .parse()
            .map_err(|_| PointError::Malformed(s.to_string()))?;
        Self::new(lat, lng)
    }
}

/// A rectangular viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// North-east corner
    pub northeast: LatLng,
    /// South-west corner
    pub southwest: LatLng,
}

impl Bounds {
    /// Create bounds from the south-west and north-east corners
    #[must_use]
    pub const fn new(southwest: LatLng, northeast: LatLng) -> Self {
        Self {
            northeast,
            southwest,
        }
    }
}

/// Query-string form, `sw|ne`
impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.southwest, self.northeast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let point = LatLng::new(38.897_663_3, -77.036_573_9).expect("valid coordinates");
        assert!((point.lat() - 38.897_663_3).abs() < f64::EPSILON);
        assert!((point.lng() + 77.036_573_9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(LatLng::new(90.0, 180.0).is_ok());
        assert!(LatLng::new(-90.0, -180.0).is_ok());
        assert!(LatLng::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(LatLng::new(91.0, 0.0), Err(PointError::OutOfRange));
        assert_eq!(LatLng::new(0.0, -181.0), Err(PointError::OutOfRange));
        assert!(LatLng::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_display_has_no_spaces() {
        let point = LatLng::new(40.714_224, -73.961_452).expect("valid");
        assert_eq!(point.to_string(), "40.714224,-73.961452");
    }

    #[test]
    fn test_parse() {
        let point: LatLng = "40.714224, -73.961452".parse().expect("parse");
        assert_eq!(point, LatLng::new_unchecked(40.714_224, -73.961_452));

        assert!(matches!(
            "not a point".parse::<LatLng>(),
            Err(PointError::Malformed(_))
        ));
        assert_eq!("95,0".parse::<LatLng>(), Err(PointError::OutOfRange));
    }

    #[test]
    fn test_serde_field_names() {
        let json = r#"{"lat": 36.578581, "lng": -118.291994}"#;
        let point: LatLng = serde_json::from_str(json).expect("deserialize");
        assert!((point.lat() - 36.578_581).abs() < f64::EPSILON);

        let out = serde_json::to_string(&point).expect("serialize");
        assert!(out.contains("\"lat\""));
        assert!(out.contains("\"lng\""));
    }

    #[test]
    fn test_bounds_display() {
        let bounds = Bounds::new(
            LatLng::new_unchecked(34.172_684, -118.604_794),
            LatLng::new_unchecked(34.236_144, -118.500_938),
        );
        assert_eq!(
            bounds.to_string(),
            "34.172684,-118.604794|34.236144,-118.500938"
        );
    }
}
