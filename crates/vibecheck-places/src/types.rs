//! Foursquare Places API response types for `GET /places/search`.
//!
//! ## Observed shape
//!
//! The search endpoint wraps records in `{"results": [...]}`. Each record
//! carries `fsq_place_id`, `name`, a `categories` array (each with a `name`),
//! a `location` block, and top-level `latitude`/`longitude`.
//!
//! Older API versions used `fsq_id` for the identifier and nested the
//! coordinates under `geocodes.main`; both are accepted.
//!
//! Every field is optional here. Records that cannot become a
//! [`vibecheck_core::Place`] are filtered in [`crate::normalize`] rather than
//! failing the whole response.

use serde::Deserialize;

/// Top-level envelope for a search response.
///
/// A missing or `null` `results` field is treated as zero results, as are
/// `null` entries inside the array.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceSearchResponse {
    #[serde(default)]
    pub results: Option<Vec<Option<RawPlace>>>,
}

/// A single place record as returned by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlace {
    #[serde(default, alias = "fsq_id")]
    pub fsq_place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<RawCategory>>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub geocodes: Option<RawGeocodes>,
}

/// Only `name` is read; other category fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

/// Legacy coordinate block: `{"main": {"latitude": .., "longitude": ..}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeocodes {
    #[serde(default)]
    pub main: Option<RawLatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawLatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Error body returned with non-2xx responses, e.g. `{"message": "Invalid API key"}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServiceErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
