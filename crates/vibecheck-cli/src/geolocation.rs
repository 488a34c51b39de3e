//! Position acquisition for a vibe check.
//!
//! [`LocationSource`] picks the collaborator from the CLI arguments and the
//! configuration: explicit coordinates win, otherwise the configured
//! geolocation mode and permission decide.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use vibecheck_core::{AppConfig, Coordinates, GeolocationMode};

const LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Error, PartialEq)]
pub(crate) enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("could not determine location: {0}")]
    Unavailable(String),
}

/// Something that can report the user's current position.
pub(crate) trait Geolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Coordinates supplied up front, e.g. from `--lat/--lon`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedLocation(pub Coordinates);

impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        if self.0.is_valid() {
            Ok(self.0)
        } else {
            Err(GeolocationError::Unavailable(format!(
                "coordinates out of range: {}",
                self.0.to_ll()
            )))
        }
    }
}

/// Response shape of the ip-api.com JSON endpoint.
///
/// `{"status":"success","lat":40.7,"lon":-74.0,...}` or
/// `{"status":"fail","message":"private range"}`.
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Approximates the position from the caller's public IP address.
pub(crate) struct IpGeolocator {
    client: reqwest::Client,
    url: String,
}

impl IpGeolocator {
    pub(crate) fn new(url: &str, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        tracing::debug!(url = %self.url, "looking up position from IP address");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeolocationError::Unavailable(format!(
                "lookup returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        if let Some(lookup_status) = body.status.as_deref() {
            if lookup_status != "success" {
                return Err(GeolocationError::Unavailable(
                    body.message.unwrap_or_else(|| "lookup failed".to_string()),
                ));
            }
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(GeolocationError::Unavailable(
                "lookup returned no coordinates".to_string(),
            ));
        };

        let coords = Coordinates::new(lat, lon);
        if !coords.is_valid() {
            return Err(GeolocationError::Unavailable(format!(
                "lookup returned out-of-range coordinates: {}",
                coords.to_ll()
            )));
        }
        Ok(coords)
    }
}

/// The geolocation collaborator chosen for this run.
pub(crate) enum LocationSource {
    Fixed(FixedLocation),
    Ip(IpGeolocator),
    Denied,
    Unsupported,
}

impl LocationSource {
    /// Selects the collaborator: `fixed` coordinates win; otherwise
    /// `VIBECHECK_GEOLOCATION=off` is unsupported, a withheld permission is
    /// denied, and anything else uses the IP lookup.
    pub(crate) fn resolve(
        config: &AppConfig,
        fixed: Option<Coordinates>,
    ) -> Result<Self, reqwest::Error> {
        if let Some(coords) = fixed {
            return Ok(Self::Fixed(FixedLocation(coords)));
        }
        let source = match config.geolocation {
            GeolocationMode::Off => Self::Unsupported,
            GeolocationMode::Ip if !config.location_allowed => Self::Denied,
            GeolocationMode::Ip => Self::Ip(IpGeolocator::new(
                &config.geolocation_url,
                &config.user_agent,
            )?),
        };
        Ok(source)
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Ip(_) => "ip",
            Self::Denied => "denied",
            Self::Unsupported => "unsupported",
        }
    }
}

impl Geolocator for LocationSource {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        match self {
            Self::Fixed(fixed) => fixed.locate().await,
            Self::Ip(ip) => ip.locate().await,
            Self::Denied => Err(GeolocationError::PermissionDenied),
            Self::Unsupported => Err(GeolocationError::Unsupported),
        }
    }
}
