//! Geocoding and reverse geocoding
//!
//! Both directions share `GET /geocode/json`. A forward lookup sets an
//! address and/or component filters; a reverse lookup sets `latlng` and may
//! narrow the results by location type and result type.

use serde::Deserialize;

use crate::error::GoogleMapsError;
use crate::language::Language;
use crate::point::{Bounds, LatLng};
use crate::request::{Endpoint, Query, require_point, require_text};
use crate::response::Payload;
use crate::tokens::token_enum;
use crate::urlencoding::encode;

token_enum! {
    /// Top-level status of a geocoding response
    pub enum GeocodeStatus {
        Ok => "OK",
        ZeroResults => "ZERO_RESULTS",
        OverDailyLimit => "OVER_DAILY_LIMIT",
        OverQueryLimit => "OVER_QUERY_LIMIT",
        RequestDenied => "REQUEST_DENIED",
        InvalidRequest => "INVALID_REQUEST",
        UnknownError => "UNKNOWN_ERROR",
    }
}

token_enum! {
    /// Precision of a geocoded location
    pub enum LocationType {
        Rooftop => "ROOFTOP",
        RangeInterpolated => "RANGE_INTERPOLATED",
        GeometricCenter => "GEOMETRIC_CENTER",
        Approximate => "APPROXIMATE",
    }
}

token_enum! {
    /// Address types usable as a `result_type` filter
    pub enum AddressType {
        StreetAddress => "street_address",
        Route => "route",
        Intersection => "intersection",
        Political => "political",
        Country => "country",
        AdministrativeAreaLevel1 => "administrative_area_level_1",
        AdministrativeAreaLevel2 => "administrative_area_level_2",
        AdministrativeAreaLevel3 => "administrative_area_level_3",
        AdministrativeAreaLevel4 => "administrative_area_level_4",
        AdministrativeAreaLevel5 => "administrative_area_level_5",
        ColloquialArea => "colloquial_area",
        Locality => "locality",
        Ward => "ward",
        Sublocality => "sublocality",
        Neighborhood => "neighborhood",
        Premise => "premise",
        Subpremise => "subpremise",
        PostalCode => "postal_code",
        NaturalFeature => "natural_feature",
        Airport => "airport",
        Park => "park",
        PointOfInterest => "point_of_interest",
    }
}

token_enum! {
    /// Fields a component filter can restrict
    pub enum ComponentKind {
        Route => "route",
        Locality => "locality",
        AdministrativeArea => "administrative_area",
        PostalCode => "postal_code",
        Country => "country",
    }
}

/// A single `kind:value` component filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentFilter {
    /// Which address component to match
    pub kind: ComponentKind,
    /// Value it must equal
    pub value: String,
}

impl ComponentFilter {
    /// Create a component filter
    #[must_use]
    pub fn new(kind: ComponentKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    fn encoded(&self) -> String {
        format!("{}:{}", self.kind, encode(&self.value))
    }
}

/// Request for `GET /geocode/json`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodeRequest {
    address: Option<String>,
    bounds: Option<Bounds>,
    components: Vec<ComponentFilter>,
    language: Option<Language>,
    latlng: Option<LatLng>,
    location_types: Vec<LocationType>,
    region: Option<String>,
    result_types: Vec<AddressType>,
}

impl GeocodeRequest {
    /// Forward geocode a free-text address
    #[must_use]
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }

    /// Forward geocode using component filters only
    #[must_use]
    pub fn for_components(components: Vec<ComponentFilter>) -> Self {
        Self {
            components,
            ..Self::default()
        }
    }

    /// Reverse geocode a point
    #[must_use]
    pub fn for_latlng(latlng: LatLng) -> Self {
        Self {
            latlng: Some(latlng),
            ..Self::default()
        }
    }

    /// Set the address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Bias results towards a viewport
    #[must_use]
    pub const fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Add a component filter
    #[must_use]
    pub fn with_component(mut self, kind: ComponentKind, value: impl Into<String>) -> Self {
        self.components.push(ComponentFilter::new(kind, value));
        self
    }

    /// Language of the results
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the point to reverse geocode
    #[must_use]
    pub const fn with_latlng(mut self, latlng: LatLng) -> Self {
        self.latlng = Some(latlng);
        self
    }

    /// Restrict reverse results to a location type
    #[must_use]
    pub fn with_location_type(mut self, location_type: LocationType) -> Self {
        self.location_types.push(location_type);
        self
    }

    /// Bias results towards a region (ccTLD code)
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Restrict reverse results to an address type
    #[must_use]
    pub fn with_result_type(mut self, result_type: AddressType) -> Self {
        self.result_types.push(result_type);
        self
    }

    /// The address to geocode, if any
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Component filters in request order
    #[must_use]
    pub fn components(&self) -> &[ComponentFilter] {
        &self.components
    }

    /// The point to reverse geocode, if any
    #[must_use]
    pub const fn latlng(&self) -> Option<LatLng> {
        self.latlng
    }
}

impl Endpoint for GeocodeRequest {
    type Payload = GeocodePayload;

    const NAME: &'static str = "geocode";
    const PATH: &'static str = "/geocode/json";

    fn validate(&self) -> Result<(), GoogleMapsError> {
        require_text("address", self.address.as_deref())?;
        require_text("region", self.region.as_deref())?;
        if let Some(component) = self.components.iter().find(|c| c.value.trim().is_empty()) {
            return Err(GoogleMapsError::Validation(format!(
                "component {} must not be empty",
                component.kind
            )));
        }

        if let Some(latlng) = &self.latlng {
            require_point("latlng", latlng)?;
        }
        if let Some(bounds) = &self.bounds {
            require_point("bounds", &bounds.southwest)?;
            require_point("bounds", &bounds.northeast)?;
        }

        if self.address.is_some() && self.latlng.is_some() {
            return Err(GoogleMapsError::Validation(
                "address and latlng are mutually exclusive".to_string(),
            ));
        }

        if self.address.is_none() && self.components.is_empty() && self.latlng.is_none() {
            return Err(GoogleMapsError::Validation(
                "one of address, components or latlng is required".to_string(),
            ));
        }

        if self.latlng.is_none() && !(self.location_types.is_empty() && self.result_types.is_empty())
        {
            return Err(GoogleMapsError::Validation(
                "location_type and result_type filters require latlng".to_string(),
            ));
        }

        Ok(())
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        if let Some(address) = &self.address {
            query.push_text("address", address);
        }
        query
            .push_opt("bounds", self.bounds)
            .push_joined("components", self.components.iter().map(ComponentFilter::encoded))
            .push_opt("language", self.language)
            .push_opt("latlng", self.latlng)
            .push_joined("location_type", &self.location_types)
            .push_opt("region", self.region.as_deref().map(encode))
            .push_joined("result_type", &self.result_types);
        query
    }
}

/// Response body of `GET /geocode/json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodePayload {
    /// Matches, best first
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Top-level status
    pub status: GeocodeStatus,
    /// Explanation supplied with non-OK statuses
    #[serde(default)]
    pub error_message: Option<String>,
}

impl GeocodePayload {
    /// Location of the best match
    #[must_use]
    pub fn first_location(&self) -> Option<LatLng> {
        self.results.first().map(|r| r.geometry.location)
    }
}

impl Payload for GeocodePayload {
    fn remote_ok(&self) -> bool {
        self.status == GeocodeStatus::Ok
    }

    fn remote_status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn remote_error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// One geocoding match
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeResult {
    /// Address split into typed parts
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    /// Human-readable address
    pub formatted_address: String,
    /// Location and viewport
    pub geometry: Geometry,
    /// Stable place identifier
    pub place_id: String,
    /// Open Location Code for the match
    #[serde(default)]
    pub plus_code: Option<PlusCode>,
    /// Whether only part of the query matched
    #[serde(default)]
    pub partial_match: bool,
    /// Address types of the match
    #[serde(default)]
    pub types: Vec<String>,
}

impl GeocodeResult {
    /// Whether the match carries the given address type
    #[must_use]
    pub fn has_type(&self, address_type: AddressType) -> bool {
        self.types.iter().any(|t| t == address_type.as_str())
    }
}

/// Part of a structured address
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressComponent {
    /// Full text, e.g. "Pennsylvania Avenue Northwest"
    pub long_name: String,
    /// Abbreviated text, e.g. "Pennsylvania Avenue NW"
    pub short_name: String,
    /// Component types, e.g. `route`
    #[serde(default)]
    pub types: Vec<String>,
}

/// Geometry of a match
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    /// Geocoded point
    pub location: LatLng,
    /// Precision of `location`
    pub location_type: LocationType,
    /// Recommended viewport
    pub viewport: Bounds,
    /// Bounding box of the whole feature, when it has one
    #[serde(default)]
    pub bounds: Option<Bounds>,
}

/// Open Location Code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlusCode {
    /// Local code with locality, e.g. "VXX7+3C Washington, DC"
    #[serde(default)]
    pub compound_code: Option<String>,
    /// Global code, e.g. "87C4VXX7+3C"
    pub global_code: String,
}
