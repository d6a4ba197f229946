//! Travel distance and time between sets of origins and destinations

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::GoogleMapsError;
use crate::language::Language;
use crate::request::{Endpoint, Query, require_text};
use crate::response::Payload;
use crate::tokens::token_enum;
use crate::urlencoding::encode;

/// Upper bound on origins or destinations in a single request
pub const MAX_DIMENSION: usize = 25;

token_enum! {
    /// Top-level status of a distance matrix response
    pub enum DistanceMatrixStatus {
        Ok => "OK",
        InvalidRequest => "INVALID_REQUEST",
        MaxElementsExceeded => "MAX_ELEMENTS_EXCEEDED",
        MaxDimensionsExceeded => "MAX_DIMENSIONS_EXCEEDED",
        OverDailyLimit => "OVER_DAILY_LIMIT",
        OverQueryLimit => "OVER_QUERY_LIMIT",
        RequestDenied => "REQUEST_DENIED",
        UnknownError => "UNKNOWN_ERROR",
    }
}

token_enum! {
    /// Status of one origin/destination pair
    pub enum ElementStatus {
        Ok => "OK",
        NotFound => "NOT_FOUND",
        ZeroResults => "ZERO_RESULTS",
        MaxRouteLengthExceeded => "MAX_ROUTE_LENGTH_EXCEEDED",
    }
}

token_enum! {
    /// Route features to avoid
    pub enum Avoid {
        Ferries => "ferries",
        Highways => "highways",
        Indoor => "indoor",
        Tolls => "tolls",
    }
}

token_enum! {
    /// Mode of transport
    pub enum TravelMode {
        Bicycling => "bicycling",
        Driving => "driving",
        Transit => "transit",
        Walking => "walking",
    }
}

token_enum! {
    /// Assumptions for the time-in-traffic estimate
    pub enum TrafficModel {
        BestGuess => "best_guess",
        Optimistic => "optimistic",
        Pessimistic => "pessimistic",
    }
}

token_enum! {
    /// Preferred transit vehicles
    pub enum TransitMode {
        Bus => "bus",
        Rail => "rail",
        Subway => "subway",
        Train => "train",
        Tram => "tram",
    }
}

token_enum! {
    /// Bias for transit route selection
    pub enum TransitRoutingPreference {
        FewerTransfers => "fewer_transfers",
        LessWalking => "less_walking",
    }
}

token_enum! {
    /// Unit system for the `text` fields
    pub enum UnitSystem {
        Imperial => "imperial",
        Metric => "metric",
    }
}

/// Departure time for a distance matrix request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartureTime {
    /// Leave immediately (`departure_time=now`)
    Now,
    /// Leave at a fixed instant
    At(DateTime<Utc>),
}

/// Query-string form, `now` or unix seconds
impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Now => f.write_str("now"),
            Self::At(at) => write!(f, "{}", at.timestamp()),
        }
    }
}

/// Request for `GET /distancematrix/json`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMatrixRequest {
    arrival_time: Option<DateTime<Utc>>,
    avoid: Vec<Avoid>,
    departure_time: Option<DepartureTime>,
    destinations: Vec<String>,
    language: Option<Language>,
    mode: Option<TravelMode>,
    origins: Vec<String>,
    region: Option<String>,
    traffic_model: Option<TrafficModel>,
    transit_modes: Vec<TransitMode>,
    transit_routing_preference: Option<TransitRoutingPreference>,
    units: Option<UnitSystem>,
}

impl DistanceMatrixRequest {
    /// Create a request for every origin/destination pair
    ///
    /// Items may be addresses, `lat,lng` pairs or `place_id:` references.
    #[must_use]
    pub fn new<O, D>(origins: O, destinations: D) -> Self
    where
        O: IntoIterator,
        O::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            origins: origins.into_iter().map(Into::into).collect(),
            destinations: destinations.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Desired arrival time (transit only)
    #[must_use]
    pub const fn with_arrival_time(mut self, arrival_time: DateTime<Utc>) -> Self {
        self.arrival_time = Some(arrival_time);
        self
    }

    /// Add a route feature to avoid
    #[must_use]
    pub fn with_avoid(mut self, avoid: Avoid) -> Self {
        self.avoid.push(avoid);
        self
    }

    /// Desired departure time
    #[must_use]
    pub const fn with_departure_time(mut self, departure_time: DepartureTime) -> Self {
        self.departure_time = Some(departure_time);
        self
    }

    /// Language of the results
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Mode of transport
    #[must_use]
    pub const fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Bias towards a region (ccTLD code)
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Traffic model (requires a departure time)
    #[must_use]
    pub const fn with_traffic_model(mut self, traffic_model: TrafficModel) -> Self {
        self.traffic_model = Some(traffic_model);
        self
    }

    /// Add a preferred transit vehicle
    #[must_use]
    pub fn with_transit_mode(mut self, transit_mode: TransitMode) -> Self {
        self.transit_modes.push(transit_mode);
        self
    }

    /// Transit routing preference
    #[must_use]
    pub const fn with_transit_routing_preference(
        mut self,
        preference: TransitRoutingPreference,
    ) -> Self {
        self.transit_routing_preference = Some(preference);
        self
    }

    /// Unit system
    #[must_use]
    pub const fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = Some(units);
        self
    }

    /// Origins in request order
    #[must_use]
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// Destinations in request order
    #[must_use]
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }
}

fn validate_places(field: &str, places: &[String]) -> Result<(), GoogleMapsError> {
    if places.is_empty() {
        return Err(GoogleMapsError::Validation(format!(
            "at least one of {field} is required"
        )));
    }
    if places.len() > MAX_DIMENSION {
        return Err(GoogleMapsError::Validation(format!(
            "at most {MAX_DIMENSION} {field} are allowed"
        )));
    }
    if places.iter().any(|p| p.trim().is_empty()) {
        return Err(GoogleMapsError::Validation(format!(
            "{field} must not contain empty entries"
        )));
    }
    Ok(())
}

impl Endpoint for DistanceMatrixRequest {
    type Payload = DistanceMatrixPayload;

    const NAME: &'static str = "distance_matrix";
    const PATH: &'static str = "/distancematrix/json";

    fn validate(&self) -> Result<(), GoogleMapsError> {
        validate_places("origins", &self.origins)?;
        validate_places("destinations", &self.destinations)?;
        require_text("region", self.region.as_deref())?;

        if self.arrival_time.is_some() && self.departure_time.is_some() {
            return Err(GoogleMapsError::Validation(
                "arrival_time and departure_time are mutually exclusive".to_string(),
            ));
        }

        if self.traffic_model.is_some() && self.departure_time.is_none() {
            return Err(GoogleMapsError::Validation(
                "traffic_model requires departure_time".to_string(),
            ));
        }

        Ok(())
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("arrival_time", self.arrival_time.map(|t| t.timestamp()))
            .push_joined("avoid", &self.avoid)
            .push_opt("departure_time", self.departure_time)
            .push_joined("destinations", self.destinations.iter().map(|d| encode(d)))
            .push_opt("language", self.language)
            .push_opt("mode", self.mode)
            .push_joined("origins", self.origins.iter().map(|o| encode(o)))
            .push_opt("region", self.region.as_deref().map(encode))
            .push_opt("traffic_model", self.traffic_model)
            .push_joined("transit_mode", &self.transit_modes)
            .push_opt("transit_routing_preference", self.transit_routing_preference)
            .push_opt("units", self.units);
        query
    }
}

/// Response body of `GET /distancematrix/json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistanceMatrixPayload {
    /// Resolved origin addresses, in request order
    #[serde(default)]
    pub origin_addresses: Vec<String>,
    /// Resolved destination addresses, in request order
    #[serde(default)]
    pub destination_addresses: Vec<String>,
    /// One row per origin
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Top-level status
    pub status: DistanceMatrixStatus,
    /// Explanation supplied with non-OK statuses
    #[serde(default)]
    pub error_message: Option<String>,
}

impl DistanceMatrixPayload {
    /// Element for the given origin and destination indices
    #[must_use]
    pub fn element(&self, origin: usize, destination: usize) -> Option<&Element> {
        self.rows.get(origin)?.elements.get(destination)
    }
}

impl Payload for DistanceMatrixPayload {
    fn remote_ok(&self) -> bool {
        self.status == DistanceMatrixStatus::Ok
    }

    fn remote_status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn remote_error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Results for one origin, one element per destination
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row {
    /// Elements in destination order
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Result for one origin/destination pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Element {
    /// Status of this pair
    pub status: ElementStatus,
    /// Route length (meters)
    #[serde(default)]
    pub distance: Option<TextValue>,
    /// Travel time (seconds)
    #[serde(default)]
    pub duration: Option<TextValue>,
    /// Travel time in current traffic (seconds)
    #[serde(default)]
    pub duration_in_traffic: Option<TextValue>,
    /// Transit fare, when available
    #[serde(default)]
    pub fare: Option<Fare>,
}

/// A measured quantity with its display text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextValue {
    /// Localized display text, e.g. "1 hour 2 mins"
    pub text: String,
    /// Value in meters or seconds
    pub value: u64,
}

/// Transit fare
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fare {
    /// ISO 4217 currency code
    pub currency: String,
    /// Localized display text
    pub text: String,
    /// Amount in `currency`
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn places_are_encoded_and_joined() {
        let request = DistanceMatrixRequest::new(
            ["Bobcaygeon ON", "24 Sussex Drive Ottawa ON"],
            ["Lexington MA", "Concord, MA"],
        );
        let query = request.query();
        assert_eq!(
            query.get("origins"),
            Some("Bobcaygeon%20ON|24%20Sussex%20Drive%20Ottawa%20ON")
        );
        assert_eq!(query.get("destinations"), Some("Lexington%20MA|Concord%2C%20MA"));
    }

    #[test]
    fn fragments_follow_fixed_order() {
        let arrival = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let request = DistanceMatrixRequest::new(["A"], ["B"])
            .with_units(UnitSystem::Metric)
            .with_transit_routing_preference(TransitRoutingPreference::LessWalking)
            .with_transit_mode(TransitMode::Bus)
            .with_transit_mode(TransitMode::Rail)
            .with_region("ca")
            .with_mode(TravelMode::Transit)
            .with_language(Language::French)
            .with_avoid(Avoid::Tolls)
            .with_arrival_time(arrival);
        assert!(request.validate().is_ok());
        assert_eq!(
            request.query().to_query_string(),
            format!(
                "arrival_time={}&avoid=tolls&destinations=B&language=fr&mode=transit\
                 &origins=A&region=ca&transit_mode=bus|rail\
                 &transit_routing_preference=less_walking&units=metric",
                arrival.timestamp()
            )
        );
    }

    #[test]
    fn transit_mode_uses_correct_key() {
        let query = DistanceMatrixRequest::new(["A"], ["B"])
            .with_transit_mode(TransitMode::Subway)
            .query();
        assert!(query.contains_key("transit_mode"));
    }

    #[test]
    fn departure_time_now() {
        let query = DistanceMatrixRequest::new(["A"], ["B"])
            .with_departure_time(DepartureTime::Now)
            .with_traffic_model(TrafficModel::BestGuess)
            .query();
        assert_eq!(query.get("departure_time"), Some("now"));
        assert_eq!(query.get("traffic_model"), Some("best_guess"));
    }

    #[test]
    fn departure_time_unix_seconds() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(DepartureTime::At(at).to_string(), "1767225600");
    }

    #[test]
    fn validation_rules() {
        assert!(
            DistanceMatrixRequest::new(Vec::<String>::new(), ["B"])
                .validate()
                .is_err()
        );
        assert!(
            DistanceMatrixRequest::new(["A"], Vec::<String>::new())
                .validate()
                .is_err()
        );
        assert!(DistanceMatrixRequest::new(["A", ""], ["B"]).validate().is_err());
        assert!(
            DistanceMatrixRequest::new(["A"], ["B"])
                .with_arrival_time(Utc::now())
                .with_departure_time(DepartureTime::Now)
                .validate()
                .is_err()
        );
        assert!(
            DistanceMatrixRequest::new(["A"], ["B"])
                .with_traffic_model(TrafficModel::Pessimistic)
                .validate()
                .is_err()
        );

        let too_many: Vec<String> = (0..=MAX_DIMENSION).map(|i| format!("Stop {i}")).collect();
        assert!(DistanceMatrixRequest::new(too_many, ["B"]).validate().is_err());
    }

    #[test]
    fn decode_payload() {
        let json = r#"{
            "destination_addresses": ["New York, NY, USA"],
            "origin_addresses": ["Washington, DC, USA"],
            "rows": [{
                "elements": [{
                    "distance": {"text": "225 mi", "value": 361715},
                    "duration": {"text": "3 hours 49 mins", "value": 13725},
                    "status": "OK"
                }]
            }],
            "status": "OK"
        }"#;
        let payload: DistanceMatrixPayload = serde_json::from_str(json).unwrap();
        assert!(payload.remote_ok());
        let element = payload.element(0, 0).unwrap();
        assert_eq!(element.status, ElementStatus::Ok);
        assert_eq!(element.distance.as_ref().map(|d| d.value), Some(361_715));
        assert_eq!(element.duration.as_ref().map(|d| d.value), Some(13_725));
        assert!(element.duration_in_traffic.is_none());
        assert!(payload.element(0, 1).is_none());
    }

    #[test]
    fn decode_invalid_request_status() {
        let payload: DistanceMatrixPayload = serde_json::from_str(
            r#"{"destination_addresses": [], "origin_addresses": [], "rows": [], "status": "INVALID_REQUEST"}"#,
        )
        .unwrap();
        assert_eq!(payload.status, DistanceMatrixStatus::InvalidRequest);
        assert!(!payload.remote_ok());
    }

    #[test]
    fn decode_element_not_found_and_fare() {
        let json = r#"{
            "status": "NOT_FOUND"
        }"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.status, ElementStatus::NotFound);
        assert!(element.distance.is_none());

        let fare: Fare =
            serde_json::from_str(r#"{"currency": "USD", "text": "$6.00", "value": 6}"#).unwrap();
        assert_eq!(fare.currency, "USD");
        assert!((fare.value - 6.0).abs() < f64::EPSILON);
    }
}
