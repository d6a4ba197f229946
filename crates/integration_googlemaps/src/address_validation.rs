//! Address Validation API (`POST v1:validateAddress`)
//!
//! Unlike the classic web services this endpoint takes a JSON body, reports
//! failures through an `error` object with a non-2xx status, and has no
//! top-level `status` token.

use serde::{Deserialize, Serialize};

use crate::error::GoogleMapsError;
use crate::request::{Endpoint, HttpMethod, Query, Service, require_text};
use crate::response::Payload;
use crate::tokens::token_enum;

token_enum! {
    /// How precisely an address was matched
    pub enum Granularity {
        Unspecified => "GRANULARITY_UNSPECIFIED",
        SubPremise => "SUB_PREMISE",
        Premise => "PREMISE",
        PremiseProximity => "PREMISE_PROXIMITY",
        Block => "BLOCK",
        Route => "ROUTE",
        Other => "OTHER",
    }
}

/// Postal address to validate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    /// CLDR region code, e.g. "US"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    /// BCP-47 language of the address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Sorting code (a few countries only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting_code: Option<String>,
    /// State, province or prefecture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    /// City or town
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// Neighborhood or district
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sublocality: Option<String>,
    /// Unstructured address lines
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address_lines: Vec<String>,
}

/// Request body for `POST v1:validateAddress`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressValidationRequest {
    address: PostalAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_response_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    enable_usps_cass: bool,
}

impl AddressValidationRequest {
    /// Validate the given address
    #[must_use]
    pub fn new(address: PostalAddress) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }

    /// Validate free-form address lines in a region
    #[must_use]
    pub fn for_lines<I>(region_code: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(PostalAddress {
            region_code: Some(region_code.into()),
            address_lines: lines.into_iter().map(Into::into).collect(),
            ..PostalAddress::default()
        })
    }

    /// Link to an earlier validation of the same address
    #[must_use]
    pub fn with_previous_response_id(mut self, response_id: impl Into<String>) -> Self {
        self.previous_response_id = Some(response_id.into());
        self
    }

    /// Enable USPS CASS processing (US and PR only)
    #[must_use]
    pub const fn with_usps_cass(mut self, enable: bool) -> Self {
        self.enable_usps_cass = enable;
        self
    }

    /// The address being validated
    #[must_use]
    pub const fn address(&self) -> &PostalAddress {
        &self.address
    }
}

impl Endpoint for AddressValidationRequest {
    type Payload = AddressValidationPayload;

    const NAME: &'static str = "validate_address";
    const SERVICE: Service = Service::AddressValidation;
    const PATH: &'static str = ":validateAddress";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn validate(&self) -> Result<(), GoogleMapsError> {
        let address = &self.address;
        require_text("regionCode", address.region_code.as_deref())?;
        require_text("languageCode", address.language_code.as_deref())?;
        require_text("postalCode", address.postal_code.as_deref())?;
        require_text("administrativeArea", address.administrative_area.as_deref())?;
        require_text("locality", address.locality.as_deref())?;
        require_text("sublocality", address.sublocality.as_deref())?;
        require_text("sortingCode", address.sorting_code.as_deref())?;
        require_text("previousResponseId", self.previous_response_id.as_deref())?;

        if address.address_lines.iter().any(|l| l.trim().is_empty()) {
            return Err(GoogleMapsError::Validation(
                "addressLines must not contain empty entries".to_string(),
            ));
        }

        if address.address_lines.is_empty()
            && address.locality.is_none()
            && address.postal_code.is_none()
        {
            return Err(GoogleMapsError::Validation(
                "one of addressLines, locality or postalCode is required".to_string(),
            ));
        }

        Ok(())
    }

    fn query(&self) -> Query {
        Query::new()
    }

    fn body(&self) -> Result<Option<String>, GoogleMapsError> {
        serde_json::to_string(self)
            .map(Some)
            .map_err(|e| GoogleMapsError::Validation(e.to_string()))
    }
}

/// Response body of `POST v1:validateAddress`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressValidationPayload {
    /// Validation outcome, absent on error
    #[serde(default)]
    pub result: Option<ValidationResult>,
    /// Identifier to pass as `previousResponseId` on a follow-up request
    #[serde(default)]
    pub response_id: Option<String>,
    /// Google API error object
    #[serde(default)]
    pub error: Option<ApiError>,
}

impl Payload for AddressValidationPayload {
    fn remote_ok(&self) -> bool {
        self.error.is_none()
    }

    fn remote_status(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.status.as_deref())
    }

    fn remote_error(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}

/// Error object returned by Google Cloud style APIs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    /// HTTP status code
    pub code: u16,
    /// Human-readable message
    pub message: String,
    /// Canonical status, e.g. "INVALID_ARGUMENT"
    #[serde(default)]
    pub status: Option<String>,
}

/// Validation outcome
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Overall verdict
    pub verdict: Verdict,
    /// Corrected address
    #[serde(default)]
    pub address: Option<ValidatedAddress>,
    /// Geocode of the corrected address
    #[serde(default)]
    pub geocode: Option<ValidationGeocode>,
}

/// Overall verdict of a validation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Granularity of the input
    #[serde(default)]
    pub input_granularity: Option<Granularity>,
    /// Granularity the address could be validated to
    #[serde(default)]
    pub validation_granularity: Option<Granularity>,
    /// Granularity of the geocode
    #[serde(default)]
    pub geocode_granularity: Option<Granularity>,
    /// No missing or unresolved components
    #[serde(default)]
    pub address_complete: bool,
    /// Some components could not be confirmed
    #[serde(default)]
    pub has_unconfirmed_components: bool,
    /// Some components were inferred
    #[serde(default)]
    pub has_inferred_components: bool,
    /// Some components were replaced
    #[serde(default)]
    pub has_replaced_components: bool,
}

/// Corrected address
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedAddress {
    /// Single-line formatted address
    pub formatted_address: String,
    /// Component types that were expected but not found
    #[serde(default)]
    pub missing_component_types: Vec<String>,
    /// Input tokens that could not be matched
    #[serde(default)]
    pub unresolved_tokens: Vec<String>,
}

/// Geocode of a validated address
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationGeocode {
    /// Geocoded point
    pub location: LatLngLiteral,
    /// Place identifier
    #[serde(default)]
    pub place_id: Option<String>,
}

/// Coordinate pair in `{latitude, longitude}` form
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLngLiteral {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl From<LatLngLiteral> for crate::point::LatLng {
    fn from(literal: LatLngLiteral) -> Self {
        Self::new_unchecked(literal.latitude, literal.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::LatLng;

    #[test]
    fn body_uses_camel_case_and_skips_unset() {
        let request = AddressValidationRequest::for_lines(
            "US",
            ["1600 Amphitheatre Pkwy", "Mountain View, CA 94043"],
        )
        .with_usps_cass(true);
        assert!(request.validate().is_ok());

        let body: serde_json::Value =
            serde_json::from_str(&request.body().unwrap().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "address": {
                    "regionCode": "US",
                    "addressLines": ["1600 Amphitheatre Pkwy", "Mountain View, CA 94043"]
                },
                "enableUspsCass": true
            })
        );
    }

    #[test]
    fn previous_response_id_is_sent() {
        let request = AddressValidationRequest::new(PostalAddress {
            locality: Some("Mountain View".to_string()),
            ..PostalAddress::default()
        })
        .with_previous_response_id("abc-123");
        let body = request.body().unwrap().unwrap();
        assert!(body.contains(r#""previousResponseId":"abc-123""#));
        assert!(!body.contains("enableUspsCass"));
    }

    #[test]
    fn query_is_empty() {
        assert!(AddressValidationRequest::for_lines("US", ["x"]).query().is_empty());
    }

    #[test]
    fn validation_rules() {
        assert!(AddressValidationRequest::default().validate().is_err());
        assert!(AddressValidationRequest::for_lines("US", [""]).validate().is_err());
        assert!(AddressValidationRequest::for_lines("", ["x"]).validate().is_err());
        assert!(
            AddressValidationRequest::new(PostalAddress {
                region_code: Some("FR".to_string()),
                sorting_code: Some(String::new()),
                address_lines: vec!["8 Rue de Rivoli".to_string()],
                ..PostalAddress::default()
            })
            .validate()
            .is_err()
        );
        assert!(
            AddressValidationRequest::new(PostalAddress {
                postal_code: Some("94043".to_string()),
                ..PostalAddress::default()
            })
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn decode_result() {
        let json = r#"{
            "result": {
                "verdict": {
                    "inputGranularity": "PREMISE",
                    "validationGranularity": "PREMISE",
                    "geocodeGranularity": "PREMISE",
                    "addressComplete": true,
                    "hasInferredComponents": true
                },
                "address": {
                    "formattedAddress": "1600 Amphitheatre Parkway, Mountain View, CA 94043-1351, USA"
                },
                "geocode": {
                    "location": {"latitude": 37.4225082, "longitude": -122.0847779},
                    "placeId": "ChIJF4Yf2Ry7j4AR__1AkytDyAE"
                }
            },
            "responseId": "a3f1c2d4-0000-4000-8000-000000000000"
        }"#;
        let payload: AddressValidationPayload = serde_json::from_str(json).unwrap();
        assert!(payload.remote_ok());
        assert!(payload.remote_status().is_none());

        let result = payload.result.unwrap();
        assert_eq!(result.verdict.validation_granularity, Some(Granularity::Premise));
        assert!(result.verdict.address_complete);
        assert!(!result.verdict.has_replaced_components);

        let location: LatLng = result.geocode.unwrap().location.into();
        assert!((location.lat() - 37.422_508_2).abs() < 1e-9);
    }

    #[test]
    fn decode_error_object() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "Address lines are required.",
                "status": "INVALID_ARGUMENT"
            }
        }"#;
        let payload: AddressValidationPayload = serde_json::from_str(json).unwrap();
        assert!(!payload.remote_ok());
        assert_eq!(payload.remote_status(), Some("INVALID_ARGUMENT"));
        assert_eq!(payload.remote_error(), Some("Address lines are required."));
    }
}
