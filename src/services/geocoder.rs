//! Geocoding client for turning addresses and zipcodes into coordinates.
//!
//! Talks to a MapQuest-compatible `address` endpoint.

use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::config::GeocoderConfig;
use crate::constants::{
    CODE_LOCATION_NOT_FOUND, CODE_UPSTREAM_ERROR, ERR_GEOCODER_FAILED, ERR_LOCATION_NOT_FOUND,
};
use crate::errors::ApiError;
use crate::models::Location;
use crate::query::GeoPoint;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    locations: Vec<ProviderLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderLocation {
    lat_lng: LatLng,
    #[serde(default)]
    street: String,
    /// City
    #[serde(default)]
    admin_area5: String,
    /// State
    #[serde(default)]
    admin_area3: String,
    /// Country
    #[serde(default)]
    admin_area1: String,
    #[serde(default)]
    postal_code: String,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// First match returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub point: GeoPoint,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

impl GeocodedLocation {
    /// Single-line address in "street, city, state zipcode, country" form.
    pub fn formatted_address(&self) -> String {
        let region = [self.state.as_deref(), self.zipcode.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.street.as_deref(),
            self.city.as_deref(),
            Some(region.as_str()).filter(|r| !r.is_empty()),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// GeoJSON point stored on the bootcamp.
    pub fn to_location(&self) -> Location {
        Location {
            kind: "Point".to_string(),
            coordinates: vec![self.point.longitude, self.point.latitude],
            formatted_address: Some(self.formatted_address()),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zipcode: self.zipcode.clone(),
            country: self.country.clone(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Pick the first location out of a provider response body.
fn first_location(body: GeocodeResponse) -> Option<GeocodedLocation> {
    let location = body
        .results
        .into_iter()
        .next()?
        .locations
        .into_iter()
        .next()?;

    Some(GeocodedLocation {
        point: GeoPoint {
            latitude: location.lat_lng.lat,
            longitude: location.lat_lng.lng,
        },
        street: non_empty(location.street),
        city: non_empty(location.admin_area5),
        state: non_empty(location.admin_area3),
        zipcode: non_empty(location.postal_code),
        country: non_empty(location.admin_area1),
    })
}

pub struct Geocoder {
    client: Client,
    config: GeocoderConfig,
}

impl Geocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Resolve an address or zipcode to its first match.
    ///
    /// Returns a 400 when the provider has no match for the input.
    pub async fn geocode(&self, address: &str) -> Result<GeocodedLocation, ApiError> {
        let url = format!("{}/address", self.config.base_url.trim_end_matches('/'));
        debug!("Geocoding '{}'", address);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.config.api_key.as_str()), ("location", address)])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Geocoder responded with status {}", response.status());
            return Err(ApiError::internal(CODE_UPSTREAM_ERROR, ERR_GEOCODER_FAILED));
        }

        let body: GeocodeResponse = response.json().await?;
        first_location(body).ok_or_else(|| {
            warn!("Geocoder found no match for '{}'", address);
            ApiError::bad_request(CODE_LOCATION_NOT_FOUND, ERR_LOCATION_NOT_FOUND)
        })
    }
}
