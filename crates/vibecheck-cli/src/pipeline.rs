//! The geolocation-then-search pipeline behind a single vibe check.

use serde::Serialize;
use thiserror::Error;
use vibecheck_core::{Coordinates, Place, VibeResult};
use vibecheck_places::{PlacesClient, PlacesError};
use vibecheck_vibe::compute_vibe;

use crate::geolocation::{GeolocationError, Geolocator};

pub(crate) const MSG_GEOLOCATION_UNSUPPORTED: &str = "Geolocation is not supported by your browser.";
pub(crate) const MSG_GEOLOCATION_DENIED: &str = "Location permission denied. Set VIBECHECK_LOCATION_ALLOWED=true or pass --lat/--lon to use this feature.";
pub(crate) const MSG_GEOLOCATION_OTHER: &str = "Could not retrieve your location.";
pub(crate) const MSG_CONNECTION: &str = "Could not connect to the Foursquare service. Please check your network connection and try again.";
pub(crate) const MSG_EMPTY_RESULTS: &str = "No places found nearby. The vibe is a mystery!";

/// Source of nearby places for a coordinate.
pub(crate) trait PlaceSource {
    async fn nearby_places(&self, coords: Coordinates) -> Result<Vec<Place>, PlacesError>;
}

impl PlaceSource for PlacesClient {
    async fn nearby_places(&self, coords: Coordinates) -> Result<Vec<Place>, PlacesError> {
        self.fetch_nearby_places(coords).await
    }
}

/// A completed check: the vibe, where it was measured, and what was found.
///
/// `places` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct VibeReport {
    pub vibe: VibeResult,
    pub coords: Coordinates,
    pub places: Vec<Place>,
}

/// Every way a vibe check can fail.
#[derive(Debug, Error)]
pub(crate) enum CheckError {
    #[error("geolocation unsupported")]
    GeolocationUnsupported,

    #[error("geolocation permission denied")]
    GeolocationDenied,

    #[error("geolocation failed: {0}")]
    GeolocationOther(String),

    #[error(transparent)]
    Connection(PlacesError),

    #[error(transparent)]
    Service(PlacesError),

    #[error("no places found nearby")]
    EmptyResults,
}

impl From<GeolocationError> for CheckError {
    fn from(err: GeolocationError) -> Self {
        match err {
            GeolocationError::Unsupported => Self::GeolocationUnsupported,
            GeolocationError::PermissionDenied => Self::GeolocationDenied,
            GeolocationError::Unavailable(reason) => Self::GeolocationOther(reason),
        }
    }
}

impl From<PlacesError> for CheckError {
    fn from(err: PlacesError) -> Self {
        if matches!(err, PlacesError::Service { .. }) {
            Self::Service(err)
        } else {
            Self::Connection(err)
        }
    }
}

impl CheckError {
    /// The single message shown in the error view.
    pub(crate) fn user_message(&self) -> String {
        match self {
            Self::GeolocationUnsupported => MSG_GEOLOCATION_UNSUPPORTED.to_string(),
            Self::GeolocationDenied => MSG_GEOLOCATION_DENIED.to_string(),
            Self::GeolocationOther(_) => MSG_GEOLOCATION_OTHER.to_string(),
            Self::Connection(_) => MSG_CONNECTION.to_string(),
            Self::Service(err) => err.to_string().trim_end().to_string(),
            Self::EmptyResults => MSG_EMPTY_RESULTS.to_string(),
        }
    }
}

/// Runs one check: locate, search around the position, score.
///
/// The search is only issued after geolocation resolves, so at most one
/// request is outstanding at a time.
///
/// # Errors
///
/// Returns the [`CheckError`] for whichever step failed, or
/// [`CheckError::EmptyResults`] when the search finds nothing usable.
pub(crate) async fn run_check<G, S>(geolocator: &G, source: &S) -> Result<VibeReport, CheckError>
where
    G: Geolocator,
    S: PlaceSource,
{
    let coords = geolocator.locate().await?;
    tracing::info!(
        latitude = coords.latitude,
        longitude = coords.longitude,
        "location acquired"
    );

    let places = source.nearby_places(coords).await?;
    if places.is_empty() {
        return Err(CheckError::EmptyResults);
    }

    let vibe = compute_vibe(&places);
    tracing::info!(
        score = vibe.score,
        label = %vibe.label,
        places = places.len(),
        "vibe computed"
    );

    Ok(VibeReport {
        vibe,
        coords,
        places,
    })
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
