//! Google Maps client configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::GoogleMapsError;

/// Configuration for the Google Maps client
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleMapsConfig {
    /// API key appended to every request (sensitive - uses SecretString)
    #[serde(skip_serializing)]
    pub api_key: SecretString,

    /// Attach the raw response body to every response
    #[serde(default)]
    pub debug: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Base URL for the classic web services
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL for the Address Validation API
    #[serde(default = "default_address_validation_url")]
    pub address_validation_url: String,
}

impl std::fmt::Debug for GoogleMapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsConfig")
            .field(
                "api_key",
                &if self.api_key.expose_secret().is_empty() {
                    None
                } else {
                    Some("[REDACTED]")
                },
            )
            .field("debug", &self.debug)
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .field("address_validation_url", &self.address_validation_url)
            .finish()
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_address_validation_url() -> String {
    "https://addressvalidation.googleapis.com/v1".to_string()
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            debug: false,
            timeout_secs: default_timeout_secs(),
            base_url: default_base_url(),
            address_validation_url: default_address_validation_url(),
        }
    }
}

impl GoogleMapsConfig {
    /// Create a configuration with the given API key and default settings
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: SecretString::from("test-key"),
            debug: true,
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Override the base URL of the classic web services
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the base URL of the Address Validation API
    #[must_use]
    pub fn with_address_validation_url(mut self, url: impl Into<String>) -> Self {
        self.address_validation_url = url.into();
        self
    }

    /// Enable or disable raw body capture
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the API key as a string reference (for building request URLs)
    pub(crate) fn api_key_str(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Load configuration from an optional `googlemaps` file and the environment
    ///
    /// Environment variables use the `GOOGLE_MAPS_` prefix, e.g.
    /// `GOOGLE_MAPS_API_KEY` or `GOOGLE_MAPS_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleMapsError::Configuration`] if the sources cannot be
    /// read or the result fails [`Self::validate`].
    pub fn load() -> Result<Self, GoogleMapsError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name("googlemaps").required(false))
                .add_source(config::Environment::with_prefix("GOOGLE_MAPS").try_parsing(true)),
        )
    }

    /// Build and validate configuration from prepared sources
    ///
    /// # Errors
    ///
    /// Returns [`GoogleMapsError::Configuration`] if the sources cannot be
    /// deserialized or the result fails [`Self::validate`].
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, GoogleMapsError> {
        let config: Self = builder
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| GoogleMapsError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), GoogleMapsError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(GoogleMapsError::Configuration(
                "api_key must not be empty".to_string(),
            ));
        }

        if self.base_url.is_empty() {
            return Err(GoogleMapsError::Configuration(
                "base_url must not be empty".to_string(),
            ));
        }

        if self.address_validation_url.is_empty() {
            return Err(GoogleMapsError::Configuration(
                "address_validation_url must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(GoogleMapsError::Configuration(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
