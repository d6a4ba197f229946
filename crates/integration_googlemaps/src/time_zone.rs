//! Time zone lookup for a point and instant

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::GoogleMapsError;
use crate::language::Language;
use crate::point::LatLng;
use crate::request::{Endpoint, Query, require_point};
use crate::response::Payload;
use crate::tokens::token_enum;

token_enum! {
    /// Top-level status of a time zone response
    pub enum TimeZoneStatus {
        Ok => "OK",
        ZeroResults => "ZERO_RESULTS",
        InvalidRequest => "INVALID_REQUEST",
        OverDailyLimit => "OVER_DAILY_LIMIT",
        OverQueryLimit => "OVER_QUERY_LIMIT",
        RequestDenied => "REQUEST_DENIED",
        UnknownError => "UNKNOWN_ERROR",
    }
}

/// Request for `GET /timezone/json`
#[derive(Debug, Clone, PartialEq)]
pub struct TimeZoneRequest {
    language: Option<Language>,
    location: LatLng,
    timestamp: DateTime<Utc>,
}

impl TimeZoneRequest {
    /// Time zone at `location` for the given instant (DST depends on it)
    #[must_use]
    pub const fn new(location: LatLng, timestamp: DateTime<Utc>) -> Self {
        Self {
            language: None,
            location,
            timestamp,
        }
    }

    /// Language of `timeZoneName`
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

impl Endpoint for TimeZoneRequest {
    type Payload = TimeZonePayload;

    const NAME: &'static str = "time_zone";
    const PATH: &'static str = "/timezone/json";

    fn validate(&self) -> Result<(), GoogleMapsError> {
        require_point("location", &self.location)?;
        if self.timestamp.timestamp() < 0 {
            return Err(GoogleMapsError::Validation(
                "timestamp must not be before 1970-01-01".to_string(),
            ));
        }
        Ok(())
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("language", self.language)
            .push("location", self.location)
            .push("timestamp", self.timestamp.timestamp());
        query
    }
}

/// Response body of `GET /timezone/json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeZonePayload {
    /// Daylight saving offset in seconds
    #[serde(default)]
    pub dst_offset: Option<i64>,
    /// Offset from UTC in seconds, without DST
    #[serde(default)]
    pub raw_offset: Option<i64>,
    /// IANA identifier, e.g. "America/Los_Angeles"
    #[serde(default)]
    pub time_zone_id: Option<String>,
    /// Localized long name, e.g. "Pacific Daylight Time"
    #[serde(default)]
    pub time_zone_name: Option<String>,
    /// Top-level status
    pub status: TimeZoneStatus,
    /// Explanation supplied with non-OK statuses
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TimeZonePayload {
    /// Total offset from UTC in seconds at the requested instant
    #[must_use]
    pub fn total_offset_secs(&self) -> Option<i64> {
        self.raw_offset?.checked_add(self.dst_offset.unwrap_or(0))
    }

    /// Resolve `timeZoneId` to a `chrono-tz` zone
    #[must_use]
    pub fn tz(&self) -> Option<Tz> {
        self.time_zone_id.as_deref()?.parse().ok()
    }
}

impl Payload for TimeZonePayload {
    fn remote_ok(&self) -> bool {
        self.status == TimeZoneStatus::Ok
    }

    fn remote_status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn remote_error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn fragments_follow_fixed_order() {
        let at = Utc.timestamp_opt(1_331_161_200, 0).unwrap();
        let request = TimeZoneRequest::new(LatLng::new_unchecked(39.603_481, -119.682_251), at)
            .with_language(Language::Spanish);
        assert!(request.validate().is_ok());
        assert_eq!(
            request.query().to_query_string(),
            "language=es&location=39.603481,-119.682251&timestamp=1331161200"
        );
    }

    #[test]
    fn language_is_optional() {
        let at = Utc.timestamp_opt(0, 0).unwrap();
        let query = TimeZoneRequest::new(LatLng::new_unchecked(0.0, 0.0), at).query();
        assert!(!query.contains_key("language"));
        assert_eq!(query.get("timestamp"), Some("0"));
    }

    #[test]
    fn negative_timestamp_is_invalid() {
        let at = Utc.timestamp_opt(-1, 0).unwrap();
        assert!(
            TimeZoneRequest::new(LatLng::new_unchecked(0.0, 0.0), at)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn bad_location_is_invalid() {
        let at = Utc.timestamp_opt(0, 0).unwrap();
        let request = TimeZoneRequest::new(LatLng::new_unchecked(-90.5, f64::INFINITY), at);
        assert!(matches!(request.validate(), Err(GoogleMapsError::Validation(_))));
    }

    #[test]
    fn decode_payload() {
        let json = r#"{
            "dstOffset": 0,
            "rawOffset": -28800,
            "status": "OK",
            "timeZoneId": "America/Los_Angeles",
            "timeZoneName": "Pacific Standard Time"
        }"#;
        let payload: TimeZonePayload = serde_json::from_str(json).unwrap();
        assert!(payload.remote_ok());
        assert_eq!(payload.total_offset_secs(), Some(-28_800));
        assert_eq!(payload.tz(), Some(chrono_tz::America::Los_Angeles));
    }

    #[test]
    fn decode_error_message_field() {
        let json = r#"{
            "errorMessage": "Invalid request. Invalid 'location' parameter.",
            "status": "INVALID_REQUEST"
        }"#;
        let payload: TimeZonePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.status, TimeZoneStatus::InvalidRequest);
        assert_eq!(
            payload.remote_error(),
            Some("Invalid request. Invalid 'location' parameter.")
        );
        assert!(payload.total_offset_secs().is_none());
        assert!(payload.tz().is_none());
    }

    #[test]
    fn total_offset_overflow_is_none() {
        let payload: TimeZonePayload = serde_json::from_str(
            r#"{"status": "OK", "rawOffset": 9223372036854775807, "dstOffset": 1}"#,
        )
        .unwrap();
        assert!(payload.total_offset_secs().is_none());
    }
}
